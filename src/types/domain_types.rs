// src/types/domain_types.rs
//! Domain-specific newtypes for values that end up inside rendered markup.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

static CSS_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0|\d+(?:\.\d+)?(?:px|rem|em|%))$")
        .expect("Failed to compile CSS length regex - this is a bug in the code")
});

/// A URL that may be used as an `src` or `href`.
///
/// Accepts absolute http(s) URLs, `data:image/...` URLs produced by uploads,
/// and root-relative paths served by the host (`/uploads/hero.png`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeUrl(String);

impl SafeUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("url"));
        }

        if trimmed.starts_with('/') && !trimmed.starts_with("//") {
            return Ok(Self(trimmed.to_string()));
        }

        match Url::parse(trimmed) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => Ok(Self(parsed.to_string())),
                "data" if trimmed[5..].starts_with("image/") => Ok(Self(trimmed.to_string())),
                scheme => Err(ValidationError::InvalidUrl {
                    url: input.to_string(),
                    reason: format!("scheme '{}' is not allowed", scheme),
                }),
            },
            Err(e) => Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A margin or padding length: `0`, `16px`, `1.5rem`, `2em`, `10%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssLength(String);

impl CssLength {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if CSS_LENGTH.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidLength(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
