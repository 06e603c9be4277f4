// src/store/mutations.rs
//! Pure block mutators.
//!
//! Each mutator reads the caller's collection and returns the next one as a
//! new value; the input is never modified. Results are renumbered so `order`
//! stays contiguous. Unknown ids are a silent no-op, not an error.

use super::collection::BlockCollection;
use crate::model::{Block, BlockData, BlockKind, BlockSettings};
use crate::types::{BlockId, LanguageCode, LocalizedText};
use serde_json::Value;
use std::fmt;

/// A user-visible reason a mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorWarning {
    /// The collection already holds the maximum number of blocks.
    MaxBlocksReached { max: usize },
    /// The host did not allow this block type in the add-block menu.
    BlockTypeNotAllowed { kind: BlockKind },
    /// Reading an image for a block failed; the block records the reason.
    UploadFailed { block: BlockId, message: String },
}

impl fmt::Display for EditorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxBlocksReached { max } => {
                write!(f, "Maximum number of blocks ({}) reached", max)
            }
            Self::BlockTypeNotAllowed { kind } => {
                write!(f, "Block type '{}' is not allowed here", kind)
            }
            Self::UploadFailed { block, message } => {
                write!(f, "Image upload for block {} failed: {}", block, message)
            }
        }
    }
}

/// Outcome of a mutator.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// The next collection. `created` names a block the mutation inserted.
    Applied {
        next: BlockCollection,
        created: Option<BlockId>,
    },
    /// Nothing to do: unknown id, self-move, empty patch target.
    Unchanged,
    /// Refused with a warning for the user; the collection is unchanged.
    Rejected(EditorWarning),
}

impl Mutation {
    fn applied(blocks: Vec<Block>) -> Self {
        Mutation::Applied {
            next: BlockCollection::from_sequence(blocks),
            created: None,
        }
    }

    fn created(blocks: Vec<Block>, id: BlockId) -> Self {
        Mutation::Applied {
            next: BlockCollection::from_sequence(blocks),
            created: Some(id),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied { .. })
    }

    /// The next collection, if the mutation applied.
    pub fn into_next(self) -> Option<BlockCollection> {
        match self {
            Mutation::Applied { next, .. } => Some(next),
            _ => None,
        }
    }
}

/// Partial update of a block. `id` and `order` are not patchable.
///
/// Fields present in the patch replace the block's field wholesale (a
/// shallow merge); use the helper constructors to merge a single language
/// or a single data key against the current block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub content: Option<LocalizedText>,
    pub data: Option<BlockData>,
    pub settings: Option<BlockSettings>,
}

impl BlockPatch {
    pub fn content(content: LocalizedText) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn data(data: BlockData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn settings(settings: BlockSettings) -> Self {
        Self {
            settings: Some(settings),
            ..Self::default()
        }
    }

    /// Replaces the text of one language, keeping the other languages.
    pub fn text(block: &Block, language: &LanguageCode, text: impl Into<String>) -> Self {
        let mut content = block.content.clone();
        content.set(language, text);
        Self::content(content)
    }

    /// Replaces one key of `data`, keeping the rest.
    pub fn data_field(block: &Block, key: &str, value: Value) -> Self {
        let mut data = block.data.clone();
        data.insert(key.to_string(), value);
        Self::data(data)
    }

    /// Replaces one layout setting, keeping the rest.
    pub fn setting(block: &Block, key: &str, value: &str) -> Self {
        let mut settings = block.settings.clone();
        settings.set(key, value);
        Self::settings(settings)
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.content.is_none() && self.data.is_none() && self.settings.is_none()
    }

    fn apply_to(self, block: &mut Block) {
        if let Some(kind) = self.kind {
            block.kind = kind;
        }
        if let Some(content) = self.content {
            block.content = content;
        }
        if let Some(data) = self.data {
            block.data = data;
        }
        if let Some(settings) = self.settings {
            block.settings = settings;
        }
    }
}

impl BlockCollection {
    /// Inserts a new `kind` block after `after`, or at the end.
    ///
    /// An `after` id that is not in the collection also appends at the end.
    /// Refused once the collection holds `max_blocks` blocks.
    pub fn add(&self, kind: BlockKind, after: Option<&BlockId>, max_blocks: usize) -> Mutation {
        if self.len() >= max_blocks {
            log::warn!(
                "Refusing to add {} block: {} of {} blocks used",
                kind,
                self.len(),
                max_blocks
            );
            return Mutation::Rejected(EditorWarning::MaxBlocksReached { max: max_blocks });
        }

        let insert_at = after
            .and_then(|id| self.position(id))
            .map(|position| position + 1)
            .unwrap_or(self.len());

        let block = Block::new(BlockId::generate(), kind);
        let id = block.id.clone();
        log::debug!("Adding {} block {} at position {}", block.kind, id, insert_at);

        let mut blocks = self.blocks().to_vec();
        blocks.insert(insert_at, block);
        Mutation::created(blocks, id)
    }

    /// Deletes the block and closes the gap.
    pub fn remove(&self, id: &BlockId) -> Mutation {
        let Some(position) = self.position(id) else {
            log::debug!("Remove ignored: no block {}", id);
            return Mutation::Unchanged;
        };

        let mut blocks = self.blocks().to_vec();
        blocks.remove(position);
        log::debug!("Removed block {} from position {}", id, position);
        Mutation::applied(blocks)
    }

    /// Clones the block under a fresh id right after the original.
    ///
    /// Every non-empty localized string is marked as a copy. Refused at the
    /// block cap like [`BlockCollection::add`].
    pub fn duplicate(&self, id: &BlockId, max_blocks: usize) -> Mutation {
        let Some(position) = self.position(id) else {
            log::debug!("Duplicate ignored: no block {}", id);
            return Mutation::Unchanged;
        };

        if self.len() >= max_blocks {
            log::warn!("Refusing to duplicate {}: block limit {} reached", id, max_blocks);
            return Mutation::Rejected(EditorWarning::MaxBlocksReached { max: max_blocks });
        }

        let original = &self.blocks()[position];
        let copy = Block {
            id: BlockId::generate(),
            content: original.content.with_copy_suffix(),
            ..original.clone()
        };
        let copy_id = copy.id.clone();
        log::debug!("Duplicated block {} as {}", id, copy_id);

        let mut blocks = self.blocks().to_vec();
        blocks.insert(position + 1, copy);
        Mutation::created(blocks, copy_id)
    }

    /// Shallow-merges `patch` into the block. `id` and `order` never change.
    pub fn update(&self, id: &BlockId, patch: BlockPatch) -> Mutation {
        let Some(position) = self.position(id) else {
            log::debug!("Update ignored: no block {}", id);
            return Mutation::Unchanged;
        };
        if patch.is_empty() {
            return Mutation::Unchanged;
        }

        let mut blocks = self.blocks().to_vec();
        patch.apply_to(&mut blocks[position]);
        Mutation::applied(blocks)
    }

    /// Moves `from` to the index `to` occupies right now (splice semantics).
    ///
    /// Moving forward lands the block after the target; moving backward lands
    /// it before. Missing ids or `from == to` are a no-op.
    pub fn move_block(&self, from: &BlockId, to: &BlockId) -> Mutation {
        if from == to {
            return Mutation::Unchanged;
        }
        let (Some(from_index), Some(to_index)) = (self.position(from), self.position(to)) else {
            log::debug!("Move ignored: {} -> {} references a missing block", from, to);
            return Mutation::Unchanged;
        };

        let mut blocks = self.blocks().to_vec();
        let moved = blocks.remove(from_index);
        blocks.insert(to_index, moved);
        log::debug!("Moved block {} from {} to {}", from, from_index, to_index);
        Mutation::applied(blocks)
    }
}
