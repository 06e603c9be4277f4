// src/formatting/block_renderer.rs
//! Block rendering engine: turns blocks into editor HTML.
//!
//! Dispatch is an exhaustive match over `BlockKind`. Kinds without a dedicated
//! renderer (and kinds this build does not know) fall through to a placeholder,
//! so rendering never fails on persisted content.

use super::controls;
use super::state::RenderContext;
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, CODE_LANGUAGES};
use crate::model::{registry, Block, BlockKind, BlockSettings};
use crate::store::BlockCollection;
use crate::types::{CssColor, CssLength, SafeUrl};
use handlebars::html_escape as escape;

/// Tailwind scale classes for `<h1>` through `<h6>`.
const HEADING_CLASSES: [&str; 6] = [
    "text-4xl font-bold",
    "text-3xl font-bold",
    "text-2xl font-semibold",
    "text-xl font-semibold",
    "text-lg font-medium",
    "text-base font-medium",
];

const PARAGRAPH_CLASS: &str = "text-base leading-relaxed";
const QUOTE_CLASS: &str = "italic text-lg border-l-4 pl-4";
const CODE_CLASS: &str = "font-mono text-sm";

// --- Public API ---

/// Renders every block in order inside the editor root element.
pub fn render_collection(collection: &BlockCollection, ctx: &RenderContext) -> String {
    let mut output = String::with_capacity(collection.len().max(1) * CHARS_PER_BLOCK_ESTIMATE);

    log::debug!(
        "Rendering {} blocks (language: {}, read-only: {})",
        collection.len(),
        ctx.language(),
        ctx.is_read_only()
    );

    output.push_str(&format!(
        r#"<div class="block-editor{}" lang="{}" dir="{}" data-block-count="{}">"#,
        if ctx.is_read_only() { " is-read-only" } else { "" },
        escape(ctx.language().as_str()),
        ctx.language().direction().as_attr(),
        collection.len()
    ));

    if collection.is_empty() {
        if !ctx.is_read_only() {
            output.push_str(&controls::empty_state());
        }
    } else {
        for block in collection {
            output.push_str(&render_block(block, ctx));
        }
        if !ctx.is_read_only() {
            output.push_str(&controls::add_at_end_button());
        }
    }

    if ctx.menu_at_end() {
        output.push_str(&controls::type_menu(None, ctx));
    }

    output.push_str("</div>");
    output
}

/// Renders one block with its wrapper and, when focused, its controls.
pub fn render_block(block: &Block, ctx: &RenderContext) -> String {
    let mut output = String::with_capacity(CHARS_PER_BLOCK_ESTIMATE);

    output.push_str(&wrapper_open(block, ctx));

    let with_controls = ctx.shows_controls(&block.id);
    if with_controls {
        output.push_str(&controls::block_controls(block, ctx));
    }

    output.push_str(r#"<div class="block-body">"#);
    output.push_str(&render_body(block, ctx));
    output.push_str("</div>");

    if ctx.settings_open_for(&block.id) {
        output.push_str(&controls::settings_panel(block));
    }
    if with_controls {
        output.push_str(&controls::add_below_button(&block.id));
    }
    if ctx.menu_after(&block.id) {
        output.push_str(&controls::type_menu(Some(&block.id), ctx));
    }

    output.push_str("</div>");
    output
}

// --- Dispatch ---

fn render_body(block: &Block, ctx: &RenderContext) -> String {
    match &block.kind {
        BlockKind::Paragraph => render_paragraph(block, ctx),
        BlockKind::Heading => render_heading(block, ctx),
        BlockKind::Image => render_image(block, ctx),
        BlockKind::Quote => render_quote(block, ctx),
        BlockKind::Code => render_code(block, ctx),
        BlockKind::Divider => render_divider(block),
        BlockKind::Video
        | BlockKind::List
        | BlockKind::Button
        | BlockKind::Embed
        | BlockKind::Other(_) => render_placeholder(block),
    }
}

// --- Wrapper ---

fn wrapper_open(block: &Block, ctx: &RenderContext) -> String {
    let mut classes = vec!["block-wrapper"];
    if ctx.is_focused(&block.id) && !ctx.is_read_only() {
        classes.push("is-focused");
    }
    if ctx.is_drag_source(&block.id) {
        classes.push("is-dragging");
    }
    if ctx.is_drop_target(&block.id) {
        classes.push("is-drop-target");
    }

    let draggable = if ctx.is_read_only() {
        ""
    } else {
        r#" draggable="true" tabindex="0""#
    };
    let style = layout_style(&block.settings)
        .map(|style| format!(r#" style="{}""#, style))
        .unwrap_or_default();

    format!(
        r#"<div class="{}" data-block-id="{}" data-block-type="{}" data-order="{}"{}{}>"#,
        classes.join(" "),
        escape(block.id.as_str()),
        escape(block.kind.type_name()),
        block.order,
        draggable,
        style
    )
}

/// Inline style from layout settings. Values that fail validation are dropped.
fn layout_style(settings: &BlockSettings) -> Option<String> {
    let mut rules = Vec::new();

    for (property, value) in [
        ("margin-top", &settings.margin_top),
        ("margin-bottom", &settings.margin_bottom),
        ("padding", &settings.padding),
    ] {
        match CssLength::parse(value) {
            Ok(length) => rules.push(format!("{}: {}", property, length.as_str())),
            Err(e) => log::debug!("Dropping {}: {}", property, e),
        }
    }

    match CssColor::parse(&settings.background_color) {
        Ok(color) if !color.is_transparent() => {
            rules.push(format!("background-color: {}", color.as_str()))
        }
        Ok(_) => {}
        Err(e) => log::debug!("Dropping background-color: {}", e),
    }

    if rules.is_empty() {
        None
    } else {
        Some(rules.join("; "))
    }
}

// --- Text blocks ---

fn text_area(block: &Block, ctx: &RenderContext, class: &str, placeholder: &str) -> String {
    format!(
        r#"<textarea class="{}" data-block-id="{}" data-field="content" data-language="{}" dir="{}" placeholder="{}" rows="1">{}</textarea>"#,
        class,
        escape(block.id.as_str()),
        escape(ctx.language().as_str()),
        ctx.language().direction().as_attr(),
        escape(placeholder),
        escape(block.content.get(ctx.language()))
    )
}

fn render_paragraph(block: &Block, ctx: &RenderContext) -> String {
    if ctx.is_read_only() {
        return format!(
            r#"<p class="{}" dir="{}">{}</p>"#,
            PARAGRAPH_CLASS,
            ctx.language().direction().as_attr(),
            escape(block.content.get(ctx.language()))
        );
    }
    text_area(block, ctx, PARAGRAPH_CLASS, ctx.placeholder())
}

fn render_heading(block: &Block, ctx: &RenderContext) -> String {
    let level = block.data_view().heading_level();
    let class = HEADING_CLASSES[usize::from(level) - 1];

    if ctx.is_read_only() {
        return format!(
            r#"<h{level} class="{}" dir="{}">{}</h{level}>"#,
            class,
            ctx.language().direction().as_attr(),
            escape(block.content.get(ctx.language())),
            level = level
        );
    }
    text_area(
        block,
        ctx,
        &format!("block-heading {}", class),
        &format!("Heading {}", level),
    )
}

fn render_quote(block: &Block, ctx: &RenderContext) -> String {
    let view = block.data_view();
    let dir = ctx.language().direction().as_attr();

    if ctx.is_read_only() {
        let attribution = match view.non_empty("author") {
            Some(author) => {
                let source = view
                    .non_empty("source")
                    .map(|source| format!(", <cite>{}</cite>", escape(source)))
                    .unwrap_or_default();
                format!(
                    r#"<footer class="quote-attribution">&mdash; {}{}</footer>"#,
                    escape(author),
                    source
                )
            }
            None => String::new(),
        };
        return format!(
            r#"<blockquote class="{}" dir="{}"><p>{}</p>{}</blockquote>"#,
            QUOTE_CLASS,
            dir,
            escape(block.content.get(ctx.language())),
            attribution
        );
    }

    let id = escape(block.id.as_str());
    format!(
        r#"<blockquote class="block-quote" dir="{dir}">{}<input type="text" class="quote-author" data-block-id="{id}" data-field="author" placeholder="Author" value="{}"><input type="text" class="quote-source" data-block-id="{id}" data-field="source" placeholder="Source" value="{}"></blockquote>"#,
        text_area(block, ctx, QUOTE_CLASS, "Quote"),
        escape(view.str("author")),
        escape(view.str("source")),
        dir = dir,
        id = id
    )
}

fn render_code(block: &Block, ctx: &RenderContext) -> String {
    let language = block.data_view().str("language");
    let text = escape(block.content.get(ctx.language()));

    if ctx.is_read_only() {
        return format!(
            r#"<pre class="block-code" data-language="{lang}" dir="ltr"><code class="language-{lang}">{}</code></pre>"#,
            text,
            lang = escape(language)
        );
    }

    let options: String = CODE_LANGUAGES
        .iter()
        .map(|(value, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                value,
                if *value == language { " selected" } else { "" },
                label
            )
        })
        .collect();

    format!(
        r#"<div class="block-code" data-language="{}"><select class="code-language" data-block-id="{}" data-field="language">{}</select><textarea class="{}" data-block-id="{}" data-field="content" data-language="{}" dir="ltr" spellcheck="false" placeholder="Code" rows="4">{}</textarea></div>"#,
        escape(language),
        escape(block.id.as_str()),
        options,
        CODE_CLASS,
        escape(block.id.as_str()),
        escape(ctx.language().as_str()),
        text
    )
}

// --- Media and layout blocks ---

fn render_image(block: &Block, ctx: &RenderContext) -> String {
    let view = block.data_view();
    let url = view.non_empty("url").and_then(|url| match SafeUrl::parse(url) {
        Ok(safe) => Some(safe),
        Err(e) => {
            log::warn!("Image block {} has an unusable url: {}", block.id, e);
            None
        }
    });

    let mut output = String::new();
    match url {
        Some(url) => {
            let caption = view
                .non_empty("caption")
                .map(|caption| format!("<figcaption>{}</figcaption>", escape(caption)))
                .unwrap_or_default();
            output.push_str(&format!(
                r#"<figure class="block-image text-{}"><img src="{}" alt="{}" class="{} h-auto rounded">{}</figure>"#,
                view.alignment().as_str(),
                escape(url.as_str()),
                escape(view.str("alt")),
                view.image_size().width_class(),
                caption
            ));
            if !ctx.is_read_only() {
                output.push_str(&controls::upload_button(&block.id, "Replace image"));
            }
        }
        None if ctx.is_read_only() => return output,
        None => output.push_str(&controls::upload_dropzone(&block.id)),
    }

    if !ctx.is_read_only() {
        if let Some(error) = view.non_empty("uploadError") {
            output.push_str(&format!(
                r#"<p class="upload-error" role="alert">{}</p>"#,
                escape(error)
            ));
        }
    }
    output
}

fn render_divider(block: &Block) -> String {
    let view = block.data_view();
    let spacing = view.non_empty("spacing").unwrap_or("medium");
    format!(
        r#"<hr class="block-divider" data-spacing="{}" style="border-top-style: {}">"#,
        escape(spacing),
        view.divider_style().as_str()
    )
}

fn render_placeholder(block: &Block) -> String {
    let spec = registry::lookup(&block.kind);
    let label = match &block.kind {
        BlockKind::Other(name) => name.as_str(),
        _ => spec.label,
    };
    format!(
        r#"<div class="block-placeholder"><span class="block-icon" data-icon="{}"></span><span>{} block not implemented</span></div>"#,
        spec.icon,
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockId, LanguageCode, LocalizedText};
    use pretty_assertions::assert_eq;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(BlockId::parse(id).unwrap(), kind)
    }

    fn en() -> RenderContext {
        RenderContext::default()
    }

    fn read_only() -> RenderContext {
        RenderContext::read_only(LanguageCode::english())
    }

    #[test]
    fn heading_level_selects_tag_and_scale() {
        let heading = block("h", BlockKind::Heading)
            .with_data("level", 9)
            .with_content(LocalizedText::new().with("en", "Title"));
        let html = render_body(&heading, &read_only());
        assert_eq!(
            html,
            r#"<h6 class="text-base font-medium" dir="ltr">Title</h6>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        let paragraph = block("p", BlockKind::Paragraph)
            .with_content(LocalizedText::new().with("en", "<script>alert(1)</script>"));
        let html = render_block(&paragraph, &read_only());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn rtl_language_sets_direction() {
        let paragraph = block("p", BlockKind::Paragraph)
            .with_content(LocalizedText::new().with("ar", "مرحبا"));
        let ctx = RenderContext::new(LanguageCode::parse("ar").unwrap());
        let html = render_block(&paragraph, &ctx);
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains("مرحبا"));
    }

    #[test]
    fn controls_only_on_focused_block() {
        let a = block("a", BlockKind::Paragraph);
        let b = block("b", BlockKind::Paragraph);
        let ctx = en().with_focus(Some(a.id.clone()));
        assert!(render_block(&a, &ctx).contains(r#"data-action="duplicate""#));
        assert!(!render_block(&b, &ctx).contains(r#"data-action="duplicate""#));
        assert!(!render_block(&a, &ctx.with_read_only(true)).contains("block-controls"));
    }

    #[test]
    fn unknown_and_unimplemented_kinds_render_placeholder() {
        for kind in [
            BlockKind::Video,
            BlockKind::List,
            BlockKind::Button,
            BlockKind::Embed,
            BlockKind::from_type_name("carousel"),
        ] {
            let html = render_body(&block("x", kind), &read_only());
            assert!(html.contains("block not implemented"), "{}", html);
        }
        let html = render_body(&block("x", BlockKind::from_type_name("carousel")), &en());
        assert!(html.contains(r#"data-icon="box""#));
        assert!(html.contains("carousel block not implemented"));
    }

    #[test]
    fn image_without_url_offers_upload_only_when_editing() {
        let image = block("img", BlockKind::Image).with_data("uploadError", "too big");
        let editing = render_body(&image, &en());
        assert!(editing.contains(r#"data-action="upload""#));
        assert!(editing.contains("too big"));
        assert_eq!(render_body(&image, &read_only()), "");
    }

    #[test]
    fn image_rejects_script_urls() {
        let image = block("img", BlockKind::Image).with_data("url", "javascript:alert(1)");
        assert!(!render_body(&image, &read_only()).contains("<img"));
    }

    #[test]
    fn image_uses_size_and_alignment() {
        let image = block("img", BlockKind::Image)
            .with_data("url", "https://cdn.example.com/a.png")
            .with_data("size", "large")
            .with_data("alignment", "center");
        let html = render_body(&image, &read_only());
        assert!(html.contains("text-center"));
        assert!(html.contains("w-full"));
    }

    #[test]
    fn quote_attribution_requires_author() {
        let quote = block("q", BlockKind::Quote)
            .with_content(LocalizedText::new().with("en", "Stay hungry"))
            .with_data("source", "Stanford");
        assert!(!render_body(&quote, &read_only()).contains("quote-attribution"));

        let quote = quote.with_data("author", "Jobs");
        let html = render_body(&quote, &read_only());
        assert!(html.contains("&mdash; Jobs, <cite>Stanford</cite>"));
    }

    #[test]
    fn code_selects_current_language() {
        let code = block("c", BlockKind::Code).with_data("language", "rust");
        let html = render_body(&code, &en());
        assert!(html.contains(r#"<option value="rust" selected>Rust</option>"#));
        assert!(html.contains(r#"<option value="python">Python</option>"#));
    }

    #[test]
    fn divider_style_falls_back_to_solid() {
        let divider = block("d", BlockKind::Divider).with_data("style", "wavy");
        assert!(render_body(&divider, &en()).contains("border-top-style: solid"));
        let divider = divider.with_data("style", "dotted");
        assert!(render_body(&divider, &en()).contains("border-top-style: dotted"));
    }

    #[test]
    fn invalid_layout_values_are_dropped() {
        let mut paragraph = block("p", BlockKind::Paragraph);
        paragraph.settings.set("backgroundColor", "red; position: fixed");
        paragraph.settings.set("padding", "8px");
        let style = layout_style(&paragraph.settings).unwrap();
        assert_eq!(style, "margin-top: 0; margin-bottom: 16px; padding: 8px");
    }

    #[test]
    fn empty_collection_offers_first_block() {
        let empty = BlockCollection::new();
        assert!(render_collection(&empty, &en()).contains("Add your first block"));
        assert!(!render_collection(&empty, &read_only()).contains("Add your first block"));
    }
}
