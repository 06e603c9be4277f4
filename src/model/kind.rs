use crate::types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of block kinds the editor knows, plus a carrier for
/// anything else a host may have persisted.
///
/// Unknown kinds round-trip unchanged and render as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Paragraph,
    Heading,
    Image,
    Video,
    Quote,
    Code,
    List,
    Divider,
    Button,
    Embed,
    Other(String),
}

impl BlockKind {
    /// Every known kind, in the order the block menu lists them.
    pub const KNOWN: [BlockKind; 10] = [
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::List,
        BlockKind::Divider,
        BlockKind::Button,
        BlockKind::Embed,
    ];

    /// Maps a persisted `type` string; never fails.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "paragraph" => BlockKind::Paragraph,
            "heading" => BlockKind::Heading,
            "image" => BlockKind::Image,
            "video" => BlockKind::Video,
            "quote" => BlockKind::Quote,
            "code" => BlockKind::Code,
            "list" => BlockKind::List,
            "divider" => BlockKind::Divider,
            "button" => BlockKind::Button,
            "embed" => BlockKind::Embed,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// Like `from_type_name`, but rejects kinds the registry does not know.
    pub fn parse_known(name: &str) -> Result<Self, ValidationError> {
        match Self::from_type_name(name.trim()) {
            BlockKind::Other(other) => Err(ValidationError::UnknownBlockType(other)),
            known => Ok(known),
        }
    }

    /// Get block type name
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::List => "list",
            BlockKind::Divider => "divider",
            BlockKind::Button => "button",
            BlockKind::Embed => "embed",
            BlockKind::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BlockKind::Other(_))
    }

    /// Kinds whose `content` is the block's primary text.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph | BlockKind::Heading | BlockKind::Quote | BlockKind::Code
        )
    }
}

impl From<String> for BlockKind {
    fn from(name: String) -> Self {
        BlockKind::from_type_name(&name)
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.type_name().to_string()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
