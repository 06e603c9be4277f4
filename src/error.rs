// src/error.rs
//! Application error types with structured error handling.
//!
//! Mutations never fail with these: an overfull collection is a user-facing
//! warning and an unknown block id is a no-op. `AppError` covers the edges of
//! the crate where real I/O, parsing or templating happens.

use crate::types::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    SerializationFailed {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Failed to read upload {path}: {source}")]
    UploadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Upload {path} is not an image ({mime})")]
    UnsupportedUpload { path: PathBuf, mime: String },

    #[error("Template file not found at {path}: {source}")]
    TemplateNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error(transparent)]
    ValidationError(#[from] ValidationError),
}
