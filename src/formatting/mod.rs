// src/formatting/mod.rs
//! Renders block collections into editor HTML, Markdown and full pages.

pub mod block_renderer;
mod controls;
pub mod direct_template;
pub mod markdown;
pub mod state;

pub use self::block_renderer::{render_block, render_collection};
pub use self::direct_template::{render_page, PageExport};
pub use self::markdown::compose_markdown;
pub use self::state::{MenuAnchor, RenderContext};
