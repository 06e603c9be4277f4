// src/formatting/state.rs
//! Immutable render context threaded through the block renderer.
//!
//! The editor builds one context per render from its props and UI state; the
//! renderer only reads it. All `with_*` methods return new instances.

use crate::constants::DEFAULT_PLACEHOLDER;
use crate::model::BlockKind;
use crate::types::{BlockId, LanguageCode};

/// Where the add-block menu is open: after a block, or at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAnchor {
    pub after: Option<BlockId>,
}

/// Everything the renderer needs besides the block itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    language: LanguageCode,
    read_only: bool,
    placeholder: String,
    focused: Option<BlockId>,
    drag_source: Option<BlockId>,
    drop_target: Option<BlockId>,
    menu: Option<MenuAnchor>,
    settings_open: Option<BlockId>,
    allowed_types: Vec<BlockKind>,
}

impl RenderContext {
    pub fn new(language: LanguageCode) -> Self {
        Self {
            language,
            read_only: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            focused: None,
            drag_source: None,
            drop_target: None,
            menu: None,
            settings_open: None,
            allowed_types: BlockKind::KNOWN.to_vec(),
        }
    }

    /// A context for static output: no focus, no controls.
    pub fn read_only(language: LanguageCode) -> Self {
        Self::new(language).with_read_only(true)
    }

    pub fn with_read_only(&self, read_only: bool) -> Self {
        let mut next = self.clone();
        next.read_only = read_only;
        next
    }

    pub fn with_placeholder(&self, placeholder: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.placeholder = placeholder.into();
        next
    }

    pub fn with_focus(&self, focused: Option<BlockId>) -> Self {
        let mut next = self.clone();
        next.focused = focused;
        next
    }

    pub fn with_drag(&self, source: Option<BlockId>, target: Option<BlockId>) -> Self {
        let mut next = self.clone();
        next.drag_source = source;
        next.drop_target = target;
        next
    }

    pub fn with_menu(&self, menu: Option<MenuAnchor>) -> Self {
        let mut next = self.clone();
        next.menu = menu;
        next
    }

    pub fn with_settings_open(&self, block: Option<BlockId>) -> Self {
        let mut next = self.clone();
        next.settings_open = block;
        next
    }

    pub fn with_allowed_types(&self, allowed: Vec<BlockKind>) -> Self {
        let mut next = self.clone();
        next.allowed_types = allowed;
        next
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn allowed_types(&self) -> &[BlockKind] {
        &self.allowed_types
    }

    /// Controls are shown only on the focused block of an editable view.
    pub fn shows_controls(&self, id: &BlockId) -> bool {
        !self.read_only && self.focused.as_ref() == Some(id)
    }

    pub fn is_focused(&self, id: &BlockId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    pub fn is_drag_source(&self, id: &BlockId) -> bool {
        self.drag_source.as_ref() == Some(id)
    }

    pub fn is_drop_target(&self, id: &BlockId) -> bool {
        self.drop_target.as_ref() == Some(id)
    }

    /// Whether the menu is open directly below `id`.
    pub fn menu_after(&self, id: &BlockId) -> bool {
        !self.read_only
            && matches!(&self.menu, Some(MenuAnchor { after: Some(after) }) if after == id)
    }

    /// Whether the menu is open at the end of the collection.
    pub fn menu_at_end(&self) -> bool {
        !self.read_only && matches!(&self.menu, Some(MenuAnchor { after: None }))
    }

    pub fn settings_open_for(&self, id: &BlockId) -> bool {
        self.shows_controls(id) && self.settings_open.as_ref() == Some(id)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(LanguageCode::default())
    }
}
