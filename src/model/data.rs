//! Typed reads over a block's loosely-typed `data` map.
//!
//! Hosts persist `data` as free-form JSON, so every accessor falls back to the
//! documented default instead of failing on a missing or malformed value.

use crate::constants::{HEADING_DEFAULT_LEVEL, HEADING_MAX_LEVEL, HEADING_MIN_LEVEL};
use serde_json::{Map, Value};

/// Borrowed view over a block's `data`.
#[derive(Debug, Clone, Copy)]
pub struct DataView<'a> {
    data: &'a Map<String, Value>,
}

impl<'a> DataView<'a> {
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self { data }
    }

    /// String field, or `""` when missing or not a string.
    pub fn str(&self, key: &str) -> &'a str {
        self.data.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Non-empty string field.
    pub fn non_empty(&self, key: &str) -> Option<&'a str> {
        let value = self.str(key).trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Unsigned integer field; numeric strings are accepted.
    pub fn u64(&self, key: &str) -> Option<u64> {
        match self.data.get(key)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Array of strings; non-string entries are skipped.
    pub fn strings(&self, key: &str) -> Vec<&'a str> {
        self.data
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Heading level clamped to 1..=6, defaulting to 2.
    pub fn heading_level(&self) -> u8 {
        self.u64("level")
            .map(|level| level.clamp(HEADING_MIN_LEVEL as u64, HEADING_MAX_LEVEL as u64) as u8)
            .unwrap_or(HEADING_DEFAULT_LEVEL)
    }

    pub fn image_size(&self) -> ImageSize {
        ImageSize::parse(self.str("size"))
    }

    pub fn alignment(&self) -> Alignment {
        Alignment::parse(self.str("alignment"))
    }

    pub fn divider_style(&self) -> DividerStyle {
        DividerStyle::parse(self.str("style"))
    }

    pub fn list_type(&self) -> ListType {
        ListType::parse(self.str("type"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
}

impl ImageSize {
    /// Unrecognized sizes read as medium.
    pub fn parse(value: &str) -> Self {
        match value {
            "small" => ImageSize::Small,
            "large" => ImageSize::Large,
            _ => ImageSize::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        }
    }

    /// Width class applied to the `<img>`.
    pub fn width_class(self) -> &'static str {
        match self {
            ImageSize::Small => "w-1/3",
            ImageSize::Medium => "w-2/3",
            ImageSize::Large => "w-full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn parse(value: &str) -> Self {
        match value {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerStyle {
    Solid,
    Dashed,
    Dotted,
}

impl DividerStyle {
    /// Unrecognized styles read as solid.
    pub fn parse(value: &str) -> Self {
        match value {
            "dashed" => DividerStyle::Dashed,
            "dotted" => DividerStyle::Dotted,
            _ => DividerStyle::Solid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Bullet,
    Numbered,
}

impl ListType {
    pub fn parse(value: &str) -> Self {
        match value {
            "numbered" | "ordered" => ListType::Numbered,
            _ => ListType::Bullet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn heading_level_is_clamped_and_lenient() {
        assert_eq!(DataView::new(&map(json!({"level": 9}))).heading_level(), 6);
        assert_eq!(DataView::new(&map(json!({"level": 0}))).heading_level(), 1);
        assert_eq!(DataView::new(&map(json!({"level": "3"}))).heading_level(), 3);
        assert_eq!(DataView::new(&map(json!({"level": "big"}))).heading_level(), 2);
        assert_eq!(DataView::new(&map(json!({}))).heading_level(), 2);
    }

    #[test]
    fn unrecognized_enums_fall_back() {
        let data = map(json!({"style": "wavy", "size": "huge", "alignment": 7}));
        let view = DataView::new(&data);
        assert_eq!(view.divider_style(), DividerStyle::Solid);
        assert_eq!(view.image_size(), ImageSize::Medium);
        assert_eq!(view.alignment(), Alignment::Left);
    }

    #[test]
    fn strings_skip_non_string_items() {
        let data = map(json!({"items": ["one", 2, "three"]}));
        assert_eq!(DataView::new(&data).strings("items"), vec!["one", "three"]);
    }
}
