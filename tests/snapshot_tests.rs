// tests/snapshot_tests.rs
//! Snapshot tests for the renderers, using `insta` inline snapshots.

use content_blocks::{
    compose_markdown, render_block, render_collection, BlockCollection, LanguageCode,
    RenderContext,
};

fn fixture() -> BlockCollection {
    serde_json::from_str(include_str!("fixtures/page.json")).unwrap()
}

fn read_only(language: &str) -> RenderContext {
    RenderContext::read_only(LanguageCode::parse(language).unwrap())
}

#[test]
fn read_only_heading_and_quote() {
    let content = fixture();
    let rendered: Vec<String> = content
        .iter()
        .take(3)
        .map(|block| render_block(block, &read_only("en")))
        .collect();

    insta::assert_snapshot!(rendered.join("\n"), @r###"
    <div class="block-wrapper" data-block-id="title" data-block-type="heading" data-order="0" style="margin-top: 0; margin-bottom: 16px; padding: 0"><div class="block-body"><h1 class="text-4xl font-bold" dir="ltr">About us</h1></div></div>
    <div class="block-wrapper" data-block-id="intro" data-block-type="paragraph" data-order="1" style="margin-top: 0; margin-bottom: 16px; padding: 0"><div class="block-body"><p class="text-base leading-relaxed" dir="ltr">Welcome to our clinic.</p></div></div>
    <div class="block-wrapper" data-block-id="42" data-block-type="quote" data-order="2" style="margin-top: 0; margin-bottom: 16px; padding: 0"><div class="block-body"><blockquote class="italic text-lg border-l-4 pl-4" dir="ltr"><p>Care comes first.</p><footer class="quote-attribution">&mdash; Dr. Haddad, <cite>Founding letter</cite></footer></blockquote></div></div>
    "###);
}

#[test]
fn arabic_markdown_export() {
    insta::assert_snapshot!(compose_markdown(&fixture(), &LanguageCode::parse("ar").unwrap()), @r###"
    # من نحن

    مرحبا بكم في عيادتنا.

    ---

    <!-- unsupported block: carousel -->
    "###);
}

#[test]
fn unknown_type_renders_placeholder_in_both_modes() {
    let content: BlockCollection = serde_json::from_str(
        r#"[{"id": "u", "type": "unsupported_xyz", "content": {"en": "?"}, "order": 0}]"#,
    )
    .unwrap();

    for ctx in [read_only("en"), RenderContext::default()] {
        let html = render_collection(&content, &ctx);
        assert!(html.contains("unsupported_xyz block not implemented"));
        assert!(html.contains(r#"data-icon="box""#));
    }
}

#[test]
fn focused_block_in_edit_mode_shows_controls_and_menu() {
    let content = fixture();
    let intro = content.blocks()[1].id.clone();
    let ctx = RenderContext::default()
        .with_focus(Some(intro.clone()))
        .with_menu(Some(content_blocks::MenuAnchor {
            after: Some(intro.clone()),
        }))
        .with_allowed_types(vec![
            content_blocks::BlockKind::Paragraph,
            content_blocks::BlockKind::Quote,
        ]);

    let html = render_block(&content.blocks()[1], &ctx);
    insta::assert_snapshot!(html, @r###"<div class="block-wrapper is-focused" data-block-id="intro" data-block-type="paragraph" data-order="1" draggable="true" tabindex="0" style="margin-top: 0; margin-bottom: 16px; padding: 0"><div class="block-controls" role="toolbar"><span class="drag-handle" data-action="drag" data-block-id="intro" title="Drag to reorder"><span class="block-icon" data-icon="grip-vertical"></span></span><button type="button" data-action="settings" data-block-id="intro" aria-pressed="false" title="Settings"><span class="block-icon" data-icon="settings"></span></button><button type="button" data-action="duplicate" data-block-id="intro" title="Duplicate"><span class="block-icon" data-icon="copy"></span></button><button type="button" data-action="delete" data-block-id="intro" title="Delete"><span class="block-icon" data-icon="trash"></span></button></div><div class="block-body"><textarea class="text-base leading-relaxed" data-block-id="intro" data-field="content" data-language="en" dir="ltr" placeholder="Start typing..." rows="1">Welcome to our clinic.</textarea></div><button type="button" class="add-block-below" data-action="open-menu" data-after="intro"><span class="block-icon" data-icon="plus"></span> Add block</button><div class="block-type-menu" role="menu" data-insert-after="intro"><button type="button" class="block-type-option" role="menuitem" data-block-type="paragraph"><span class="block-icon" data-icon="type"></span>Paragraph</button><button type="button" class="block-type-option" role="menuitem" data-block-type="quote"><span class="block-icon" data-icon="quote"></span>Quote</button></div></div>"###);
}
