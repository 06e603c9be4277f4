use super::ValidationError;
use crate::constants::{COPY_SUFFIXES, DEFAULT_LANGUAGE, FALLBACK_COPY_SUFFIX, RTL_LANGUAGES};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LANGUAGE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$")
        .expect("Failed to compile language tag regex - this is a bug in the code")
});

/// A validated language code such as `en`, `ar` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if LANGUAGE_TAG.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidLanguage(input.to_string()))
        }
    }

    pub fn english() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag: `pt` for `pt-BR`.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn direction(&self) -> TextDirection {
        if RTL_LANGUAGES.contains(&self.primary()) {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn as_attr(self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "ltr",
            TextDirection::RightToLeft => "rtl",
        }
    }
}

/// Localized text of a block, keyed by language code in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(IndexMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, language: &str, text: impl Into<String>) -> Self {
        self.0.insert(language.to_string(), text.into());
        self
    }

    /// Text for `language`, or the empty string.
    pub fn get(&self, language: &LanguageCode) -> &str {
        self.0.get(language.as_str()).map(String::as_str).unwrap_or("")
    }

    pub fn get_str(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn set(&mut self, language: &LanguageCode, text: impl Into<String>) {
        self.0.insert(language.as_str().to_string(), text.into());
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.is_empty())
    }

    /// Copy with each non-empty entry suffixed the way duplicated blocks are labelled.
    pub fn with_copy_suffix(&self) -> Self {
        let suffixed = self
            .0
            .iter()
            .map(|(language, text)| {
                let text = if text.is_empty() {
                    text.clone()
                } else {
                    format!("{}{}", text, copy_suffix(language))
                };
                (language.clone(), text)
            })
            .collect();
        Self(suffixed)
    }
}

fn copy_suffix(language: &str) -> &'static str {
    let primary = language.split('-').next().unwrap_or(language);
    COPY_SUFFIXES
        .iter()
        .find(|(code, _)| *code == primary)
        .map(|(_, suffix)| *suffix)
        .unwrap_or(FALLBACK_COPY_SUFFIX)
}
