// src/formatting/markdown.rs
//! Markdown export of a block collection in one language.
//!
//! Unlike the editor renderer, every known kind has a textual form here, so
//! video, list, button and embed blocks export as links or list items.

use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::{Block, BlockKind, ListType};
use crate::store::BlockCollection;
use crate::types::LanguageCode;

/// Composes the collection as Markdown, one block per paragraph.
pub fn compose_markdown(collection: &BlockCollection, language: &LanguageCode) -> String {
    let composer = MarkdownComposer::new(language);
    let mut output = String::with_capacity(collection.len() * CHARS_PER_BLOCK_ESTIMATE / 4);

    for block in collection {
        let Some(rendered) = composer.compose_block(block) else {
            continue;
        };
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(&rendered);
    }

    if !output.is_empty() {
        output.push('\n');
    }
    log::debug!(
        "Composed {} bytes of markdown from {} blocks",
        output.len(),
        collection.len()
    );
    output
}

/// Formats single blocks as Markdown in a fixed language.
struct MarkdownComposer<'a> {
    language: &'a LanguageCode,
}

impl<'a> MarkdownComposer<'a> {
    fn new(language: &'a LanguageCode) -> Self {
        Self { language }
    }

    /// `None` for blocks that have nothing to show (empty text, no url).
    fn compose_block(&self, block: &Block) -> Option<String> {
        let text = block.content.get(self.language).trim();
        let view = block.data_view();

        match &block.kind {
            BlockKind::Paragraph => non_empty(text).map(str::to_string),
            BlockKind::Heading => non_empty(text).map(|text| {
                format!("{} {}", "#".repeat(usize::from(view.heading_level())), text)
            }),
            BlockKind::Quote => non_empty(text).map(|text| {
                let mut quote = prefix_lines(text, "> ");
                if let Some(author) = view.non_empty("author") {
                    quote.push_str(&format!("\n>\n> — {}", author));
                    if let Some(source) = view.non_empty("source") {
                        quote.push_str(&format!(", *{}*", source));
                    }
                }
                quote
            }),
            BlockKind::Code => Some(format!(
                "```{}\n{}\n```",
                view.str("language"),
                block.content.get(self.language)
            )),
            BlockKind::Image => view.non_empty("url").map(|url| {
                let mut image = format!("![{}]({})", view.str("alt"), url);
                if let Some(caption) = view.non_empty("caption") {
                    image.push_str(&format!("\n*{}*", caption));
                }
                image
            }),
            BlockKind::Video => view.non_empty("url").map(|url| {
                let label = view.non_empty("caption").unwrap_or("Video");
                format!("[{}]({})", label, url)
            }),
            BlockKind::Embed => view
                .non_empty("url")
                .map(|url| format!("[Embedded content]({})", url)),
            BlockKind::Button => view.non_empty("url").map(|url| {
                let label = non_empty(text).unwrap_or("Button");
                format!("[{}]({})", label, url)
            }),
            BlockKind::List => self.compose_list(block, text),
            BlockKind::Divider => Some("---".to_string()),
            BlockKind::Other(name) => Some(format!("<!-- unsupported block: {} -->", name)),
        }
    }

    /// List items come from `data.items`; content lines are the fallback.
    fn compose_list(&self, block: &Block, text: &str) -> Option<String> {
        let view = block.data_view();
        let mut items: Vec<&str> = view
            .strings("items")
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            items = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        }
        if items.is_empty() {
            return None;
        }

        let numbered = view.list_type() == ListType::Numbered;
        let lines: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if numbered {
                    format!("{}. {}", i + 1, item)
                } else {
                    format!("- {}", item)
                }
            })
            .collect();
        Some(lines.join("\n"))
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
