// src/editor/mod.rs
//! The controlled editor: UI state plus event handling over a host-owned
//! collection.
//!
//! The host passes the current collection into every call and receives the
//! next one through `on_change`. The editor itself only keeps transient state
//! (focus, open menu, open settings panel, drag gesture) and the warnings it
//! has shown.

mod drag;

pub use drag::{DragCoordinator, DragState, MoveRequest};

use crate::constants::{DEFAULT_MAX_BLOCKS, DEFAULT_PLACEHOLDER};
use crate::formatting::{render_collection, MenuAnchor, RenderContext};
use crate::model::BlockKind;
use crate::store::{BlockCollection, BlockPatch, EditorWarning, Mutation};
use crate::types::{BlockId, LanguageCode};
use crate::upload::{read_image_upload, UploadSource};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Host-supplied configuration of one editor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorProps {
    pub language: LanguageCode,
    pub placeholder: String,
    pub read_only: bool,
    pub max_blocks: usize,
    /// Kinds offered by the add-block menu.
    pub allowed_block_types: Vec<BlockKind>,
}

impl Default for EditorProps {
    fn default() -> Self {
        Self {
            language: LanguageCode::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            read_only: false,
            max_blocks: DEFAULT_MAX_BLOCKS,
            allowed_block_types: BlockKind::KNOWN.to_vec(),
        }
    }
}

impl EditorProps {
    pub fn allows(&self, kind: &BlockKind) -> bool {
        self.allowed_block_types.contains(kind)
    }
}

/// A user interaction, as a host (or an event script) reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EditorEvent {
    Focus { id: BlockId },
    Blur,
    OpenTypeMenu {
        #[serde(default)]
        after: Option<BlockId>,
    },
    CloseTypeMenu,
    ChooseType { kind: BlockKind },
    ToggleSettings { id: BlockId },
    Duplicate { id: BlockId },
    Delete { id: BlockId },
    EditText { id: BlockId, text: String },
    EditData { id: BlockId, key: String, value: Value },
    EditSetting { id: BlockId, key: String, value: String },
    DragStart { id: BlockId },
    DragOver { id: BlockId },
    DragLeave { id: BlockId },
    Drop { id: BlockId },
    DragEnd,
}

impl EditorEvent {
    /// Events still honored by a read-only editor.
    fn allowed_when_read_only(&self) -> bool {
        matches!(self, EditorEvent::Focus { .. } | EditorEvent::Blur)
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The collection changed; `on_change` was called with this value.
    Changed(BlockCollection),
    /// Only UI state (focus, menu, drag) changed.
    UiUpdated,
    /// Nothing happened.
    Ignored,
    /// Refused; the warning was added to the notices.
    Warned(EditorWarning),
}

impl EventOutcome {
    pub fn changed(&self) -> Option<&BlockCollection> {
        match self {
            EventOutcome::Changed(next) => Some(next),
            _ => None,
        }
    }
}

/// A controlled block editor.
pub struct BlockEditor<'a> {
    props: EditorProps,
    on_change: Box<dyn FnMut(BlockCollection) + 'a>,
    focused: Option<BlockId>,
    drag: DragCoordinator,
    menu: Option<MenuAnchor>,
    settings_open: Option<BlockId>,
    notices: Vec<EditorWarning>,
}

impl fmt::Debug for BlockEditor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockEditor")
            .field("props", &self.props)
            .field("focused", &self.focused)
            .field("drag", &self.drag)
            .field("menu", &self.menu)
            .field("settings_open", &self.settings_open)
            .field("notices", &self.notices)
            .finish()
    }
}

impl<'a> BlockEditor<'a> {
    pub fn new(props: EditorProps, on_change: impl FnMut(BlockCollection) + 'a) -> Self {
        Self {
            props,
            on_change: Box::new(on_change),
            focused: None,
            drag: DragCoordinator::new(),
            menu: None,
            settings_open: None,
            notices: Vec::new(),
        }
    }

    pub fn props(&self) -> &EditorProps {
        &self.props
    }

    pub fn focused(&self) -> Option<&BlockId> {
        self.focused.as_ref()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn menu(&self) -> Option<&MenuAnchor> {
        self.menu.as_ref()
    }

    /// Warnings shown so far, oldest first.
    pub fn notices(&self) -> &[EditorWarning] {
        &self.notices
    }

    /// Clears and returns the pending notices.
    pub fn take_notices(&mut self) -> Vec<EditorWarning> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one interaction to `content`.
    pub fn handle(&mut self, content: &BlockCollection, event: EditorEvent) -> EventOutcome {
        if self.props.read_only && !event.allowed_when_read_only() {
            log::debug!("Read-only editor ignored {:?}", event);
            return EventOutcome::Ignored;
        }

        match event {
            EditorEvent::Focus { id } => {
                if !content.contains(&id) || self.focused.as_ref() == Some(&id) {
                    return EventOutcome::Ignored;
                }
                if self.settings_open.as_ref() != Some(&id) {
                    self.settings_open = None;
                }
                self.focused = Some(id);
                EventOutcome::UiUpdated
            }
            EditorEvent::Blur => {
                if self.focused.is_none() {
                    return EventOutcome::Ignored;
                }
                self.focused = None;
                self.settings_open = None;
                EventOutcome::UiUpdated
            }
            EditorEvent::OpenTypeMenu { after } => {
                let after = after.filter(|id| content.contains(id));
                self.menu = Some(MenuAnchor { after });
                EventOutcome::UiUpdated
            }
            EditorEvent::CloseTypeMenu => match self.menu.take() {
                Some(_) => EventOutcome::UiUpdated,
                None => EventOutcome::Ignored,
            },
            EditorEvent::ChooseType { kind } => self.choose_type(content, kind),
            EditorEvent::ToggleSettings { id } => {
                if !content.contains(&id) {
                    return EventOutcome::Ignored;
                }
                if self.settings_open.as_ref() == Some(&id) {
                    self.settings_open = None;
                } else {
                    self.focused = Some(id.clone());
                    self.settings_open = Some(id);
                }
                EventOutcome::UiUpdated
            }
            EditorEvent::Duplicate { id } => {
                let mutation = content.duplicate(&id, self.props.max_blocks);
                self.commit(mutation)
            }
            EditorEvent::Delete { id } => {
                let mutation = content.remove(&id);
                if mutation.is_applied() {
                    self.forget(&id);
                }
                self.commit(mutation)
            }
            EditorEvent::EditText { id, text } => {
                let Some(block) = content.get(&id) else {
                    return EventOutcome::Ignored;
                };
                if block.content.get(&self.props.language) == text {
                    return EventOutcome::Ignored;
                }
                let patch = BlockPatch::text(block, &self.props.language, text);
                self.commit(content.update(&id, patch))
            }
            EditorEvent::EditData { id, key, value } => {
                let Some(block) = content.get(&id) else {
                    return EventOutcome::Ignored;
                };
                let patch = BlockPatch::data_field(block, &key, value);
                self.commit(content.update(&id, patch))
            }
            EditorEvent::EditSetting { id, key, value } => {
                let Some(block) = content.get(&id) else {
                    return EventOutcome::Ignored;
                };
                let patch = BlockPatch::setting(block, &key, &value);
                self.commit(content.update(&id, patch))
            }
            EditorEvent::DragStart { id } => {
                if !content.contains(&id) {
                    return EventOutcome::Ignored;
                }
                self.drag.start(id);
                EventOutcome::UiUpdated
            }
            EditorEvent::DragOver { id } => self.drag_step(|drag| drag.over(id)),
            EditorEvent::DragLeave { id } => self.drag_step(|drag| drag.leave(&id)),
            EditorEvent::Drop { id } => {
                if self.drag.is_idle() {
                    return EventOutcome::Ignored;
                }
                match self.drag.drop(&id) {
                    Some(request) => {
                        self.commit(content.move_block(&request.source, &request.target))
                    }
                    // Released on the source: the gesture ends without a move.
                    None => EventOutcome::UiUpdated,
                }
            }
            EditorEvent::DragEnd => {
                if self.drag.is_idle() {
                    return EventOutcome::Ignored;
                }
                self.drag.cancel();
                EventOutcome::UiUpdated
            }
        }
    }

    /// Reads an image from `source` and stores it on the image block `id`.
    ///
    /// A failed read is recorded on the block and as a notice.
    pub async fn upload<S>(
        &mut self,
        content: &BlockCollection,
        id: &BlockId,
        source: &S,
        path: &Path,
    ) -> EventOutcome
    where
        S: UploadSource + ?Sized,
    {
        if self.props.read_only {
            log::debug!("Read-only editor ignored upload for {}", id);
            return EventOutcome::Ignored;
        }

        let result = read_image_upload(source, path).await;
        let failure = result.as_ref().err().map(ToString::to_string);
        let outcome = self.commit(content.apply_upload(id, result));

        if let (Some(message), EventOutcome::Changed(_)) = (failure, &outcome) {
            self.warn(EditorWarning::UploadFailed {
                block: id.clone(),
                message,
            });
        }
        outcome
    }

    /// Renders `content` with the current UI state.
    pub fn render(&self, content: &BlockCollection) -> String {
        let ctx = RenderContext::new(self.props.language.clone())
            .with_read_only(self.props.read_only)
            .with_placeholder(self.props.placeholder.clone())
            .with_allowed_types(self.props.allowed_block_types.clone())
            .with_focus(self.focused.clone())
            .with_menu(self.menu.clone())
            .with_settings_open(self.settings_open.clone());

        let ctx = match self.drag.state() {
            DragState::Idle => ctx,
            DragState::Dragging { source } => ctx.with_drag(Some(source.clone()), None),
            DragState::HoveringTarget { source, target } => {
                ctx.with_drag(Some(source.clone()), Some(target.clone()))
            }
        };

        render_collection(content, &ctx)
    }

    fn choose_type(&mut self, content: &BlockCollection, kind: BlockKind) -> EventOutcome {
        let after = self.menu.take().and_then(|anchor| anchor.after);

        if !self.props.allows(&kind) {
            let warning = EditorWarning::BlockTypeNotAllowed { kind };
            self.warn(warning.clone());
            return EventOutcome::Warned(warning);
        }

        self.commit(content.add(kind, after.as_ref(), self.props.max_blocks))
    }

    /// Reports an applied mutation to the host and focuses any new block.
    /// Applies a hover change, reporting `Ignored` when the drag state is unchanged.
    fn drag_step(&mut self, step: impl FnOnce(&mut DragCoordinator)) -> EventOutcome {
        let before = self.drag.state().clone();
        step(&mut self.drag);
        if *self.drag.state() == before {
            EventOutcome::Ignored
        } else {
            EventOutcome::UiUpdated
        }
    }

    fn commit(&mut self, mutation: Mutation) -> EventOutcome {
        match mutation {
            Mutation::Applied { next, created } => {
                if let Some(created) = created {
                    self.focused = Some(created);
                    self.settings_open = None;
                }
                (self.on_change)(next.clone());
                EventOutcome::Changed(next)
            }
            Mutation::Unchanged => EventOutcome::Ignored,
            Mutation::Rejected(warning) => {
                self.warn(warning.clone());
                EventOutcome::Warned(warning)
            }
        }
    }

    fn warn(&mut self, warning: EditorWarning) {
        log::warn!("{}", warning);
        self.notices.push(warning);
    }

    /// Drops UI state that points at a deleted block.
    fn forget(&mut self, id: &BlockId) {
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        if self.settings_open.as_ref() == Some(id) {
            self.settings_open = None;
        }
        if matches!(&self.menu, Some(MenuAnchor { after: Some(after) }) if after == id) {
            self.menu = None;
        }
        if self.drag.is_source(id) || self.drag.is_target(id) {
            self.drag.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::types::LocalizedText;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn id(value: &str) -> BlockId {
        BlockId::parse(value).unwrap()
    }

    fn collection(ids: &[&str]) -> BlockCollection {
        BlockCollection::from_blocks(
            ids.iter()
                .map(|value| {
                    Block::new(id(value), BlockKind::Paragraph)
                        .with_content(LocalizedText::new().with("en", *value))
                })
                .collect(),
        )
    }

    fn order(collection: &BlockCollection) -> Vec<&str> {
        collection.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn chosen_type_is_inserted_after_menu_anchor_and_focused() {
        let calls = RefCell::new(Vec::new());
        let content = collection(&["a", "b"]);
        let mut editor = BlockEditor::new(EditorProps::default(), |next| {
            calls.borrow_mut().push(next)
        });

        editor.handle(&content, EditorEvent::OpenTypeMenu { after: Some(id("a")) });
        let outcome = editor.handle(&content, EditorEvent::ChooseType { kind: BlockKind::Heading });

        let next = outcome.changed().unwrap().clone();
        assert_eq!(next.len(), 3);
        assert_eq!(next.blocks()[1].kind, BlockKind::Heading);
        assert_eq!(editor.focused(), Some(&next.blocks()[1].id));
        assert!(editor.menu().is_none());
        drop(editor);
        assert_eq!(calls.into_inner(), vec![next]);
    }

    #[test]
    fn disallowed_type_is_warned_not_added() {
        let props = EditorProps {
            allowed_block_types: vec![BlockKind::Paragraph],
            ..EditorProps::default()
        };
        let mut editor = BlockEditor::new(props, |_| panic!("no change expected"));
        let outcome = editor.handle(&collection(&["a"]), EditorEvent::ChooseType { kind: BlockKind::Image });
        assert_eq!(
            outcome,
            EventOutcome::Warned(EditorWarning::BlockTypeNotAllowed { kind: BlockKind::Image })
        );
        assert_eq!(editor.notices().len(), 1);
    }

    #[test]
    fn cap_is_surfaced_as_notice() {
        let props = EditorProps {
            max_blocks: 2,
            ..EditorProps::default()
        };
        let mut editor = BlockEditor::new(props, |_| panic!("no change expected"));
        let content = collection(&["a", "b"]);
        let outcome = editor.handle(&content, EditorEvent::Duplicate { id: id("a") });
        assert_eq!(
            outcome,
            EventOutcome::Warned(EditorWarning::MaxBlocksReached { max: 2 })
        );
        assert_eq!(
            editor.take_notices(),
            vec![EditorWarning::MaxBlocksReached { max: 2 }]
        );
        assert!(editor.notices().is_empty());
    }

    #[test]
    fn read_only_ignores_mutations() {
        let props = EditorProps {
            read_only: true,
            ..EditorProps::default()
        };
        let mut editor = BlockEditor::new(props, |_| panic!("read-only editors never change"));
        let content = collection(&["a", "b"]);
        for event in [
            EditorEvent::Delete { id: id("a") },
            EditorEvent::Duplicate { id: id("a") },
            EditorEvent::EditText { id: id("a"), text: "x".into() },
            EditorEvent::ChooseType { kind: BlockKind::Paragraph },
            EditorEvent::DragStart { id: id("a") },
        ] {
            assert_eq!(editor.handle(&content, event), EventOutcome::Ignored);
        }
        assert!(!editor.render(&content).contains("block-controls"));
    }

    #[test]
    fn focus_changes_never_call_on_change() {
        let mut editor = BlockEditor::new(EditorProps::default(), |_| panic!("focus must not mutate"));
        let content = collection(&["a", "b"]);
        assert_eq!(editor.handle(&content, EditorEvent::Focus { id: id("a") }), EventOutcome::UiUpdated);
        assert_eq!(editor.handle(&content, EditorEvent::Focus { id: id("b") }), EventOutcome::UiUpdated);
        assert_eq!(editor.focused(), Some(&id("b")));
        assert_eq!(editor.handle(&content, EditorEvent::Focus { id: id("zzz") }), EventOutcome::Ignored);
        assert_eq!(editor.handle(&content, EditorEvent::Blur), EventOutcome::UiUpdated);
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn drag_and_drop_moves_block() {
        let mut editor = BlockEditor::new(EditorProps::default(), |_| {});
        let content = collection(&["a", "b", "c"]);
        editor.handle(&content, EditorEvent::DragStart { id: id("a") });
        editor.handle(&content, EditorEvent::DragOver { id: id("c") });
        assert!(editor.render(&content).contains("is-drop-target"));

        let next = editor
            .handle(&content, EditorEvent::Drop { id: id("c") })
            .changed()
            .cloned()
            .unwrap();
        assert_eq!(order(&next), vec!["b", "c", "a"]);
        assert!(next.is_contiguous());
        assert_eq!(editor.drag_state(), &DragState::Idle);
    }

    #[test]
    fn dropping_on_source_changes_nothing() {
        let mut editor = BlockEditor::new(EditorProps::default(), |_| panic!("self-drop must not move"));
        let content = collection(&["a", "b"]);
        editor.handle(&content, EditorEvent::DragStart { id: id("a") });
        assert_eq!(editor.handle(&content, EditorEvent::Drop { id: id("a") }), EventOutcome::UiUpdated);
        assert_eq!(editor.drag_state(), &DragState::Idle);
    }

    #[test]
    fn drag_events_without_a_gesture_are_ignored() {
        let mut editor = BlockEditor::new(EditorProps::default(), |_| panic!("no drag in progress"));
        let content = collection(&["a", "b"]);
        assert_eq!(editor.handle(&content, EditorEvent::DragOver { id: id("b") }), EventOutcome::Ignored);
        assert_eq!(editor.handle(&content, EditorEvent::DragLeave { id: id("b") }), EventOutcome::Ignored);
        assert_eq!(editor.handle(&content, EditorEvent::Drop { id: id("b") }), EventOutcome::Ignored);

        editor.handle(&content, EditorEvent::DragStart { id: id("a") });
        assert_eq!(editor.handle(&content, EditorEvent::DragOver { id: id("a") }), EventOutcome::Ignored);
        assert_eq!(editor.handle(&content, EditorEvent::DragOver { id: id("b") }), EventOutcome::UiUpdated);
        assert_eq!(editor.handle(&content, EditorEvent::DragOver { id: id("b") }), EventOutcome::Ignored);
    }

    #[test]
    fn deleting_focused_block_clears_focus() {
        let mut editor = BlockEditor::new(EditorProps::default(), |_| {});
        let content = collection(&["a", "b"]);
        editor.handle(&content, EditorEvent::ToggleSettings { id: id("a") });
        assert_eq!(editor.focused(), Some(&id("a")));
        let next = editor
            .handle(&content, EditorEvent::Delete { id: id("a") })
            .changed()
            .cloned()
            .unwrap();
        assert_eq!(order(&next), vec!["b"]);
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn edit_text_touches_only_active_language() {
        let props = EditorProps {
            language: LanguageCode::parse("ar").unwrap(),
            ..EditorProps::default()
        };
        let mut editor = BlockEditor::new(props, |_| {});
        let content = collection(&["a"]);
        let next = editor
            .handle(&content, EditorEvent::EditText { id: id("a"), text: "مرحبا".into() })
            .changed()
            .cloned()
            .unwrap();
        let block = next.get(&id("a")).unwrap();
        assert_eq!(block.content.get_str("en"), Some("a"));
        assert_eq!(block.content.get_str("ar"), Some("مرحبا"));
    }

    #[test]
    fn events_deserialize_from_script_lines() {
        let event: EditorEvent =
            serde_json::from_str(r#"{"event": "editData", "id": "a", "key": "level", "value": 3}"#)
                .unwrap();
        assert_eq!(
            event,
            EditorEvent::EditData {
                id: id("a"),
                key: "level".into(),
                value: serde_json::json!(3)
            }
        );
        let event: EditorEvent = serde_json::from_str(r#"{"event": "openTypeMenu"}"#).unwrap();
        assert_eq!(event, EditorEvent::OpenTypeMenu { after: None });
    }
}
