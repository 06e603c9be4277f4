// src/analytics/mod.rs
//! Content measurement and statistics for block collections.

use crate::constants::REQUIRED_LANGUAGES;
use crate::model::BlockKind;
use crate::store::BlockCollection;
use crate::types::BlockId;
use indexmap::IndexMap;
use serde::Serialize;

/// Quick statistics for user-facing progress messages.
///
/// Use this for lightweight summaries shown to the user (e.g., "Loaded 12 blocks").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub total_blocks: usize,
    pub unknown_blocks: usize,
}

/// Detailed breakdown of a collection, printed by the `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMeasurement {
    pub total_blocks: usize,
    /// Block count per type, in first-seen order.
    pub by_type: IndexMap<String, usize>,
    pub unknown_blocks: usize,
    /// Text-bearing blocks whose text is missing or empty, per language.
    pub missing_translations: IndexMap<String, Vec<BlockId>>,
    pub images_without_url: usize,
    pub upload_errors: usize,
}

impl ContentMeasurement {
    /// Whether every text-bearing block has text in every measured language.
    pub fn is_fully_translated(&self) -> bool {
        self.missing_translations.values().all(Vec::is_empty)
    }
}

/// Measures basic statistics for a collection.
pub fn measure_content(collection: &BlockCollection) -> ContentSummary {
    ContentSummary {
        total_blocks: collection.len(),
        unknown_blocks: collection.iter().filter(|b| !b.kind.is_known()).count(),
    }
}

/// Measures detailed metrics. Missing translations are checked for the
/// required languages plus any language that appears in the collection.
pub fn measure_collection(collection: &BlockCollection) -> ContentMeasurement {
    let mut measurement = ContentMeasurement {
        total_blocks: collection.len(),
        ..ContentMeasurement::default()
    };

    let mut languages: Vec<String> = REQUIRED_LANGUAGES.iter().map(|l| l.to_string()).collect();
    for block in collection {
        for language in block.content.languages() {
            if !languages.iter().any(|known| known == language) {
                languages.push(language.to_string());
            }
        }
    }
    for language in &languages {
        measurement
            .missing_translations
            .insert(language.clone(), Vec::new());
    }

    for block in collection {
        *measurement
            .by_type
            .entry(block.kind.type_name().to_string())
            .or_insert(0) += 1;

        if !block.kind.is_known() {
            measurement.unknown_blocks += 1;
        }

        if block.kind.is_text_bearing() {
            for language in &languages {
                let text = block.content.get_str(language).unwrap_or("");
                if text.trim().is_empty() {
                    if let Some(missing) = measurement.missing_translations.get_mut(language) {
                        missing.push(block.id.clone());
                    }
                }
            }
        }

        if block.kind == BlockKind::Image {
            let view = block.data_view();
            if view.non_empty("url").is_none() {
                measurement.images_without_url += 1;
            }
            if view.non_empty("uploadError").is_some() {
                measurement.upload_errors += 1;
            }
        }
    }

    log::debug!(
        "Measured {} blocks across {} types, {} languages",
        measurement.total_blocks,
        measurement.by_type.len(),
        languages.len()
    );
    measurement
}
