// src/constants.rs
//! Domain constants that define the operational boundaries of the editor.
//!
//! Each constant is named for the concept it constrains. Reading them should
//! tell you how the editor behaves: how many blocks a page may hold, which
//! heading levels exist, which languages read right-to-left.

// ---------------------------------------------------------------------------
// Collection boundaries
// ---------------------------------------------------------------------------

/// Default cap on the number of blocks in one content field.
///
/// Every editor-initiated growth (add, duplicate) is rejected once the
/// collection holds this many blocks, unless the host configures another cap.
pub const DEFAULT_MAX_BLOCKS: usize = 50;

/// Prefix of every block id minted by this crate.
pub const BLOCK_ID_PREFIX: &str = "block-";

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

/// Language used when the host does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages every block's content map is expected to carry.
pub const REQUIRED_LANGUAGES: &[&str] = &["en", "ar"];

/// Languages rendered with `dir="rtl"`.
pub const RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur"];

/// Suffix appended to duplicated text, by language.
pub const COPY_SUFFIXES: &[(&str, &str)] = &[("en", " (Copy)"), ("ar", " (نسخة)")];

/// Suffix for languages without an entry in `COPY_SUFFIXES`.
pub const FALLBACK_COPY_SUFFIX: &str = " (Copy)";

/// Placeholder shown in empty text blocks when the host provides none.
pub const DEFAULT_PLACEHOLDER: &str = "Start typing...";

// ---------------------------------------------------------------------------
// Block data boundaries
// ---------------------------------------------------------------------------

/// Heading levels run from `<h1>` to `<h6>`.
pub const HEADING_MIN_LEVEL: u8 = 1;
pub const HEADING_MAX_LEVEL: u8 = 6;

/// Level given to new headings and to headings with an unreadable level.
pub const HEADING_DEFAULT_LEVEL: u8 = 2;

/// Languages offered by the code block's language selector, in menu order.
pub const CODE_LANGUAGES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("csharp", "C#"),
    ("php", "PHP"),
    ("ruby", "Ruby"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sql", "SQL"),
    ("json", "JSON"),
    ("bash", "Bash"),
];

/// Height in pixels given to new embeds.
pub const EMBED_DEFAULT_HEIGHT: u64 = 400;

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters of HTML per block, used to pre-allocate output.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 512;
