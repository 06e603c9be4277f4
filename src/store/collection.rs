// src/store/collection.rs
//! The ordered block collection and its normalization from persisted data.

use crate::model::{default_data, Block, BlockKind, BlockSettings, RawBlock};
use crate::types::{BlockId, LocalizedText};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;

/// An ordered sequence of blocks belonging to one content field.
///
/// Invariant: `blocks[i].order == i` for every block, so the `order` values
/// are exactly `0..len` and sorting by `order` reproduces the sequence.
/// Every constructor and mutator re-establishes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockCollection {
    blocks: Vec<Block>,
}

impl BlockCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes raw persisted blocks. See [`normalize`].
    pub fn normalize(raw: Vec<RawBlock>) -> Self {
        normalize(raw)
    }

    /// Builds a collection from typed blocks, sorting by their `order`.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|block| block.order);
        Self::from_sequence(blocks)
    }

    /// Takes `blocks` in the given sequence and renumbers `order` to match.
    pub(crate) fn from_sequence(mut blocks: Vec<Block>) -> Self {
        for (position, block) in blocks.iter_mut().enumerate() {
            block.order = position;
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Converts back to the raw persisted shape.
    pub fn into_raw(self) -> Vec<RawBlock> {
        self.blocks.into_iter().map(RawBlock::from).collect()
    }

    /// Whether `order` values are exactly `0..len` in sequence.
    pub fn is_contiguous(&self) -> bool {
        self.blocks
            .iter()
            .enumerate()
            .all(|(position, block)| block.order == position)
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl Serialize for BlockCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.blocks.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BlockCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<RawBlock>::deserialize(deserializer)?;
        Ok(normalize(raw))
    }
}

/// Produces a normalized, sorted, uniquely-identified collection.
///
/// - a block without an id, or repeating an id seen earlier in `raw`, gets
///   `block-<unix millis>-<n>`, where `n` starts at its index and skips any
///   id already taken by another block in `raw`
/// - a missing or unreadable `order` defaults to the positional index
/// - a missing or non-string `type` reads as paragraph; missing `data` takes
///   the kind's defaults; missing `settings` take layout defaults
/// - blocks are stably sorted by `order` and renumbered `0..n`
///
/// Normalizing an already-normalized collection yields an equal collection.
pub fn normalize(raw: Vec<RawBlock>) -> BlockCollection {
    normalize_at(raw, chrono::Utc::now().timestamp_millis())
}

fn normalize_at(raw: Vec<RawBlock>, stamp: i64) -> BlockCollection {
    let explicit: HashSet<BlockId> = raw
        .iter()
        .filter_map(|raw_block| raw_block.id.as_ref().and_then(read_id))
        .collect();
    let mut seen: HashSet<BlockId> = HashSet::with_capacity(raw.len());
    let mut keyed = Vec::with_capacity(raw.len());
    let mut synthesized = 0usize;
    let stride = raw.len().max(1);

    for (index, raw_block) in raw.into_iter().enumerate() {
        let id = match raw_block.id.as_ref().and_then(read_id) {
            Some(id) if !seen.contains(&id) => id,
            _ => {
                synthesized += 1;
                let mut counter = index;
                loop {
                    let candidate = BlockId::synthetic(stamp, counter);
                    if !seen.contains(&candidate) && !explicit.contains(&candidate) {
                        break candidate;
                    }
                    counter += stride;
                }
            }
        };
        seen.insert(id.clone());

        let order_key = raw_block
            .order
            .as_ref()
            .and_then(read_order)
            .unwrap_or(index as u64);

        let kind = raw_block
            .kind
            .as_ref()
            .and_then(Value::as_str)
            .map(BlockKind::from_type_name)
            .unwrap_or(BlockKind::Paragraph);

        let data = match raw_block.data {
            Some(Value::Object(data)) => data,
            _ => default_data(&kind),
        };

        let settings = match &raw_block.settings {
            Some(Value::Object(entries)) => BlockSettings::from_loose(entries),
            _ => BlockSettings::default(),
        };

        let block = Block {
            id,
            content: raw_block
                .content
                .as_ref()
                .map(read_content)
                .unwrap_or_default(),
            data,
            settings,
            kind,
            order: 0,
        };
        keyed.push((order_key, block));
    }

    if synthesized > 0 {
        log::debug!("Assigned synthetic ids to {} block(s)", synthesized);
    }

    keyed.sort_by_key(|(order_key, _)| *order_key);
    BlockCollection::from_sequence(keyed.into_iter().map(|(_, block)| block).collect())
}

fn read_id(value: &Value) -> Option<BlockId> {
    match value {
        Value::String(s) => BlockId::parse(s).ok(),
        Value::Number(n) => BlockId::parse(&n.to_string()).ok(),
        _ => None,
    }
}

fn read_order(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_content(value: &Value) -> LocalizedText {
    match value {
        Value::Object(entries) => entries
            .iter()
            .fold(LocalizedText::new(), |text, (language, entry)| {
                let entry = match entry {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                text.with(language, entry)
            }),
        Value::String(s) => LocalizedText::new().with(crate::constants::DEFAULT_LANGUAGE, s.clone()),
        _ => LocalizedText::new(),
    }
}
