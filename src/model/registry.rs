// src/model/registry.rs
//! Static metadata describing each block kind.
//!
//! Pure lookup table: icon, menu label, whether the block's content is edited
//! as text, and which fields its settings panel exposes.

use super::kind::BlockKind;

/// A field shown in a block's settings panel, with its persisted location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    /// Key in `data`.
    Data(&'static str),
    /// Key in `settings`.
    Layout(&'static str),
}

impl SettingsField {
    pub fn key(self) -> &'static str {
        match self {
            SettingsField::Data(key) | SettingsField::Layout(key) => key,
        }
    }
}

/// Registry entry for one block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub icon: &'static str,
    pub label: &'static str,
    pub editable: bool,
    pub settings_fields: &'static [SettingsField],
}

const LAYOUT: [SettingsField; 4] = [
    SettingsField::Layout("marginTop"),
    SettingsField::Layout("marginBottom"),
    SettingsField::Layout("backgroundColor"),
    SettingsField::Layout("padding"),
];

const PARAGRAPH: BlockSpec = BlockSpec {
    icon: "type",
    label: "Paragraph",
    editable: true,
    settings_fields: &LAYOUT,
};

const HEADING: BlockSpec = BlockSpec {
    icon: "heading",
    label: "Heading",
    editable: true,
    settings_fields: &[
        SettingsField::Data("level"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
        SettingsField::Layout("backgroundColor"),
        SettingsField::Layout("padding"),
    ],
};

const IMAGE: BlockSpec = BlockSpec {
    icon: "image",
    label: "Image",
    editable: false,
    settings_fields: &[
        SettingsField::Data("alt"),
        SettingsField::Data("caption"),
        SettingsField::Data("alignment"),
        SettingsField::Data("size"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
    ],
};

const VIDEO: BlockSpec = BlockSpec {
    icon: "video",
    label: "Video",
    editable: false,
    settings_fields: &[
        SettingsField::Data("url"),
        SettingsField::Data("caption"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
    ],
};

const QUOTE: BlockSpec = BlockSpec {
    icon: "quote",
    label: "Quote",
    editable: true,
    settings_fields: &[
        SettingsField::Data("author"),
        SettingsField::Data("source"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
        SettingsField::Layout("backgroundColor"),
        SettingsField::Layout("padding"),
    ],
};

const CODE: BlockSpec = BlockSpec {
    icon: "code",
    label: "Code",
    editable: true,
    settings_fields: &[
        SettingsField::Data("language"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
    ],
};

const LIST: BlockSpec = BlockSpec {
    icon: "list",
    label: "List",
    editable: true,
    settings_fields: &[
        SettingsField::Data("type"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
        SettingsField::Layout("padding"),
    ],
};

const DIVIDER: BlockSpec = BlockSpec {
    icon: "minus",
    label: "Divider",
    editable: false,
    settings_fields: &[
        SettingsField::Data("style"),
        SettingsField::Data("spacing"),
    ],
};

const BUTTON: BlockSpec = BlockSpec {
    icon: "square",
    label: "Button",
    editable: true,
    settings_fields: &[
        SettingsField::Data("url"),
        SettingsField::Data("style"),
        SettingsField::Data("size"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
    ],
};

const EMBED: BlockSpec = BlockSpec {
    icon: "external-link",
    label: "Embed",
    editable: false,
    settings_fields: &[
        SettingsField::Data("url"),
        SettingsField::Data("height"),
        SettingsField::Layout("marginTop"),
        SettingsField::Layout("marginBottom"),
    ],
};

const FALLBACK: BlockSpec = BlockSpec {
    icon: "box",
    label: "Block",
    editable: false,
    settings_fields: &LAYOUT,
};

/// Registry entry for `kind`. Unknown kinds get a generic entry.
pub fn lookup(kind: &BlockKind) -> &'static BlockSpec {
    match kind {
        BlockKind::Paragraph => &PARAGRAPH,
        BlockKind::Heading => &HEADING,
        BlockKind::Image => &IMAGE,
        BlockKind::Video => &VIDEO,
        BlockKind::Quote => &QUOTE,
        BlockKind::Code => &CODE,
        BlockKind::List => &LIST,
        BlockKind::Divider => &DIVIDER,
        BlockKind::Button => &BUTTON,
        BlockKind::Embed => &EMBED,
        BlockKind::Other(_) => &FALLBACK,
    }
}

/// Every registered kind with its entry, in menu order.
pub fn all() -> impl Iterator<Item = (BlockKind, &'static BlockSpec)> {
    BlockKind::KNOWN
        .into_iter()
        .map(|kind| {
            let spec = lookup(&kind);
            (kind, spec)
        })
}
