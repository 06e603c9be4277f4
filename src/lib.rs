// src/lib.rs
//! content-blocks library: the core of a controlled, block-based content
//! editor for multilingual pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Domain model**: `Block`, `BlockKind`, `BlockSettings`, registry lookups
//! - **Domain types**: `BlockId`, `LanguageCode`, `LocalizedText`, `SafeUrl`
//! - **Store**: `BlockCollection`, `normalize`, pure mutators returning `Mutation`
//! - **Editor**: `BlockEditor`, `EditorEvent`, drag/drop coordination
//! - **Formatting**: editor HTML, Markdown export, Handlebars pages
//! - **Upload**: reading image files into data URLs

pub mod analytics;
pub mod config;
pub mod constants;
pub mod editor;
mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod types;
pub mod upload;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandPlan, EditorConfig};

// --- Domain Model ---
pub use crate::model::{
    default_data, registry, Alignment, Block, BlockData, BlockKind, BlockSettings, BlockSpec,
    DataView, DividerStyle, ImageSize, ListType, RawBlock, SettingsField,
};

// --- Domain Types ---
pub use crate::types::{
    BlockId, CssColor, CssLength, LanguageCode, LocalizedText, SafeUrl, TextDirection,
};

// --- Store ---
pub use crate::store::{normalize, BlockCollection, BlockPatch, EditorWarning, Mutation};

// --- Editor ---
pub use crate::editor::{
    BlockEditor, DragCoordinator, DragState, EditorEvent, EditorProps, EventOutcome, MoveRequest,
};

// --- Formatting ---
pub use crate::formatting::{
    compose_markdown, render_block, render_collection, render_page, MenuAnchor, PageExport,
    RenderContext,
};

// --- Upload ---
pub use crate::upload::{read_image_upload, FsUploadSource, ImageUpload, UploadSource};

// --- Analytics ---
pub use crate::analytics::{measure_collection, measure_content, ContentMeasurement, ContentSummary};

// --- Pipeline Traits ---
pub use crate::pipeline::{
    run_command, CommandReport, ContentComposer, ContentDelivery, ContentSource, ContentTransform,
};
