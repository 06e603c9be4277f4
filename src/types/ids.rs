use super::ValidationError;
use crate::constants::BLOCK_ID_PREFIX;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a block.
///
/// Ids are opaque strings: the host may persist any non-empty value and the
/// editor keeps it untouched. Ids minted here are never reused, so a deleted
/// block's id can not come back attached to another block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Parses a host-supplied id. Surrounding whitespace is trimmed.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidId(format!(
                "control characters in id: {:?}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Mints a fresh random id for a block created in the editor.
    pub fn generate() -> Self {
        Self(format!("{}{}", BLOCK_ID_PREFIX, Uuid::new_v4().as_simple()))
    }

    /// Synthetic id for a persisted block that arrived without one.
    ///
    /// The index keeps ids unique among blocks normalized in the same call.
    pub fn synthetic(timestamp_millis: i64, index: usize) -> Self {
        Self(format!("{}{}-{}", BLOCK_ID_PREFIX, timestamp_millis, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BlockId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let a = BlockId::generate();
        let b = BlockId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with(BLOCK_ID_PREFIX));
    }

    #[test]
    fn synthetic_ids_encode_timestamp_and_index() {
        let id = BlockId::synthetic(1_700_000_000_000, 3);
        assert_eq!(id.as_str(), "block-1700000000000-3");
    }

    #[test]
    fn parse_rejects_blank_and_control_characters() {
        assert!(BlockId::parse("  ").is_err());
        assert!(BlockId::parse("a\nb").is_err());
        assert_eq!(BlockId::parse(" hero ").unwrap().as_str(), "hero");
    }
}
