use super::data::DataView;
use super::kind::BlockKind;
use crate::types::{BlockId, LocalizedText};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type-specific settings of a block (`data` in the persisted shape).
pub type BlockData = Map<String, Value>;

/// A single addressable unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: LocalizedText,
    #[serde(default)]
    pub data: BlockData,
    #[serde(default)]
    pub settings: BlockSettings,
    pub order: usize,
}

impl Block {
    /// Creates a block of `kind` with registry defaults, unplaced (`order` 0).
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        let data = super::defaults::default_data(&kind);
        Self {
            id,
            kind,
            content: LocalizedText::default(),
            data,
            settings: BlockSettings::default(),
            order: 0,
        }
    }

    pub fn with_content(mut self, content: LocalizedText) -> Self {
        self.content = content;
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Read-only typed access to `data`.
    pub fn data_view(&self) -> DataView<'_> {
        DataView::new(&self.data)
    }
}

/// Layout-only properties applied uniformly regardless of type.
///
/// Keys the editor does not know are kept in `extra` so they survive a
/// load/save cycle through the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSettings {
    pub margin_top: String,
    pub margin_bottom: String,
    pub background_color: String,
    pub padding: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            margin_top: "0".to_string(),
            margin_bottom: "16px".to_string(),
            background_color: "transparent".to_string(),
            padding: "0".to_string(),
            extra: Map::new(),
        }
    }
}

impl BlockSettings {
    /// Reads one setting by its persisted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "marginTop" => Some(&self.margin_top),
            "marginBottom" => Some(&self.margin_bottom),
            "backgroundColor" => Some(&self.background_color),
            "padding" => Some(&self.padding),
            other => self.extra.get(other).and_then(Value::as_str),
        }
    }

    /// Reads settings persisted by hosts that were not strict about types.
    ///
    /// Numeric lengths become CSS lengths (`0`, otherwise pixels). Values of
    /// the wrong type fall back to the default for that key. Unknown keys are
    /// kept as-is in `extra`.
    pub fn from_loose(entries: &Map<String, Value>) -> Self {
        let mut settings = Self::default();
        for (key, value) in entries {
            match key.as_str() {
                "marginTop" | "marginBottom" | "padding" => {
                    let length = match value {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) if n.as_f64() == Some(0.0) => Some("0".to_string()),
                        Value::Number(n) => Some(format!("{}px", n)),
                        _ => None,
                    };
                    match length {
                        Some(length) => settings.set(key, &length),
                        None => log::debug!("Ignoring unreadable setting {}: {}", key, value),
                    }
                }
                "backgroundColor" => match value.as_str() {
                    Some(color) => settings.set(key, color),
                    None => log::debug!("Ignoring unreadable setting {}: {}", key, value),
                },
                other => {
                    settings.extra.insert(other.to_string(), value.clone());
                }
            }
        }
        settings
    }

    /// Sets one setting by its persisted key. Unknown keys land in `extra`.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "marginTop" => self.margin_top = value.to_string(),
            "marginBottom" => self.margin_bottom = value.to_string(),
            "backgroundColor" => self.background_color = value.to_string(),
            "padding" => self.padding = value.to_string(),
            other => {
                self.extra
                    .insert(other.to_string(), Value::String(value.to_string()));
            }
        }
    }
}

/// A persisted block as the host stored it, possibly missing fields.
///
/// Every field is kept as loose JSON and read leniently during
/// normalization: ids may be numbers, orders may be numeric strings, and
/// `content` may be a bare string, which is read as English. A field of the
/// wrong shape is treated as missing rather than failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        Self {
            id: Some(Value::String(block.id.as_str().to_string())),
            kind: Some(Value::String(block.kind.type_name().to_string())),
            content: serde_json::to_value(&block.content).ok(),
            data: Some(Value::Object(block.data)),
            settings: serde_json::to_value(&block.settings).ok(),
            order: Some(Value::from(block.order)),
        }
    }
}
