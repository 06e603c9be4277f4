use super::block::BlockData;
use super::kind::BlockKind;
use crate::constants::{EMBED_DEFAULT_HEIGHT, HEADING_DEFAULT_LEVEL};
use serde_json::{json, Value};

/// Default `data` for a new block, keyed purely by kind. Unknown kinds get `{}`.
pub fn default_data(kind: &BlockKind) -> BlockData {
    let value = match kind {
        BlockKind::Paragraph => json!({}),
        BlockKind::Heading => json!({ "level": HEADING_DEFAULT_LEVEL }),
        BlockKind::Image => json!({
            "url": "",
            "alt": "",
            "caption": "",
            "alignment": "left",
            "size": "medium",
        }),
        BlockKind::Video => json!({ "url": "", "caption": "" }),
        BlockKind::Quote => json!({ "author": "", "source": "" }),
        BlockKind::Code => json!({ "language": "javascript" }),
        BlockKind::List => json!({ "type": "bullet", "items": [""] }),
        BlockKind::Divider => json!({ "style": "solid", "spacing": "medium" }),
        BlockKind::Button => json!({
            "url": "",
            "style": "primary",
            "size": "medium",
        }),
        BlockKind::Embed => json!({ "url": "", "height": EMBED_DEFAULT_HEIGHT }),
        BlockKind::Other(_) => json!({}),
    };

    match value {
        Value::Object(map) => map,
        _ => BlockData::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_defaults_to_level_two() {
        assert_eq!(default_data(&BlockKind::Heading).get("level"), Some(&json!(2)));
    }

    #[test]
    fn image_defaults_to_left_medium() {
        let data = default_data(&BlockKind::Image);
        assert_eq!(data.get("alignment"), Some(&json!("left")));
        assert_eq!(data.get("size"), Some(&json!("medium")));
    }

    #[test]
    fn unknown_kinds_get_empty_data() {
        assert!(default_data(&BlockKind::Other("carousel".into())).is_empty());
        assert!(default_data(&BlockKind::Paragraph).is_empty());
    }
}
