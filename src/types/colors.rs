use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("Failed to compile hex color regex - this is a bug in the code")
});

/// Named colors the settings panel offers besides hex values.
const NAMED_COLORS: &[&str] = &[
    "transparent",
    "white",
    "black",
    "gray",
    "red",
    "orange",
    "yellow",
    "green",
    "blue",
    "purple",
    "pink",
];

/// A background color that is safe to place inside a `style` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssColor(String);

impl CssColor {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = input.trim();
        if HEX_COLOR.is_match(value) {
            return Ok(Self(value.to_ascii_lowercase()));
        }
        let lowered = value.to_ascii_lowercase();
        if NAMED_COLORS.contains(&lowered.as_str()) {
            return Ok(Self(lowered));
        }
        Err(ValidationError::InvalidColor(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_transparent(&self) -> bool {
        self.0 == "transparent"
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
