//! The block data model: kinds, records, typed data views and the registry.

mod block;
pub mod data;
mod defaults;
mod kind;
pub mod registry;

pub use block::{Block, BlockData, BlockSettings, RawBlock};
pub use data::{Alignment, DataView, DividerStyle, ImageSize, ListType};
pub use defaults::default_data;
pub use kind::BlockKind;
pub use registry::{BlockSpec, SettingsField};
