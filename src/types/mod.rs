use thiserror::Error;

mod colors;
mod domain_types;
mod ids;
mod language;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;
pub use language::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid block ID: {0}")]
    InvalidId(String),

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid CSS length: {0}")]
    InvalidLength(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u64, min: u64, max: u64 },

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}
