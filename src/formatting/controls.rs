// src/formatting/controls.rs
//! Editor chrome around blocks: toolbar, add buttons, type menu, settings panel.

use super::state::RenderContext;
use crate::model::{registry, Block, BlockKind, SettingsField};
use crate::types::BlockId;
use handlebars::html_escape as escape;
use serde_json::Value;

fn icon(name: &str) -> String {
    format!(r#"<span class="block-icon" data-icon="{}"></span>"#, name)
}

/// Drag handle plus settings, duplicate and delete for the focused block.
pub(super) fn block_controls(block: &Block, ctx: &RenderContext) -> String {
    let id = escape(block.id.as_str());
    let settings_open = ctx.settings_open_for(&block.id);
    format!(
        concat!(
            r#"<div class="block-controls" role="toolbar">"#,
            r#"<span class="drag-handle" data-action="drag" data-block-id="{id}" title="Drag to reorder">{drag}</span>"#,
            r#"<button type="button" data-action="settings" data-block-id="{id}" aria-pressed="{open}" title="Settings">{settings}</button>"#,
            r#"<button type="button" data-action="duplicate" data-block-id="{id}" title="Duplicate">{copy}</button>"#,
            r#"<button type="button" data-action="delete" data-block-id="{id}" title="Delete">{trash}</button>"#,
            "</div>"
        ),
        id = id,
        open = settings_open,
        drag = icon("grip-vertical"),
        settings = icon("settings"),
        copy = icon("copy"),
        trash = icon("trash"),
    )
}

pub(super) fn add_below_button(id: &BlockId) -> String {
    format!(
        r#"<button type="button" class="add-block-below" data-action="open-menu" data-after="{}">{} Add block</button>"#,
        escape(id.as_str()),
        icon("plus")
    )
}

pub(super) fn add_at_end_button() -> String {
    format!(
        r#"<button type="button" class="add-block-end" data-action="open-menu">{} Add block</button>"#,
        icon("plus")
    )
}

pub(super) fn empty_state() -> String {
    format!(
        r#"<div class="block-editor-empty"><button type="button" data-action="open-menu">{} Add your first block</button></div>"#,
        icon("plus")
    )
}

/// The add-block menu, listing only the allowed kinds in registry order.
pub(super) fn type_menu(after: Option<&BlockId>, ctx: &RenderContext) -> String {
    let anchor = after
        .map(|id| format!(r#" data-insert-after="{}""#, escape(id.as_str())))
        .unwrap_or_default();

    let options: String = registry::all()
        .filter(|(kind, _)| ctx.allowed_types().contains(kind))
        .map(|(kind, spec)| {
            format!(
                r#"<button type="button" class="block-type-option" role="menuitem" data-block-type="{}">{}{}</button>"#,
                kind.type_name(),
                icon(spec.icon),
                spec.label
            )
        })
        .collect();

    format!(
        r#"<div class="block-type-menu" role="menu"{}>{}</div>"#,
        anchor, options
    )
}

/// Settings panel listing the registry's fields for this block's kind.
pub(super) fn settings_panel(block: &Block) -> String {
    let spec = registry::lookup(&block.kind);
    let id = escape(block.id.as_str());

    let fields: String = spec
        .settings_fields
        .iter()
        .map(|field| {
            let (scope, value, input_type) = match field {
                SettingsField::Data(key) => {
                    let value = block.data.get(*key);
                    let input_type = if matches!(value, Some(Value::Number(_))) {
                        "number"
                    } else {
                        "text"
                    };
                    (
                        "data",
                        value.map(display_value).unwrap_or_default(),
                        input_type,
                    )
                }
                SettingsField::Layout(key) => (
                    "settings",
                    block.settings.get(key).unwrap_or_default().to_string(),
                    "text",
                ),
            };
            format!(
                r#"<label class="settings-field"><span>{key}</span><input type="{}" data-block-id="{id}" data-scope="{}" data-field="{key}" value="{}"></label>"#,
                input_type,
                scope,
                escape(&value),
                key = field.key(),
                id = id
            )
        })
        .collect();

    let title = match &block.kind {
        BlockKind::Other(name) => name.clone(),
        _ => spec.label.to_string(),
    };
    format!(
        r#"<div class="block-settings" data-block-id="{}"><h4>{} settings</h4>{}</div>"#,
        id,
        escape(&title),
        fields
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Replace-image button shown under an uploaded image.
pub(super) fn upload_button(id: &BlockId, label: &str) -> String {
    format!(
        r#"<label class="image-upload-replace" data-action="upload" data-block-id="{}">{}{}<input type="file" accept="image/*" hidden></label>"#,
        escape(id.as_str()),
        icon("upload"),
        escape(label)
    )
}

/// Empty image block: click or drop a file to upload.
pub(super) fn upload_dropzone(id: &BlockId) -> String {
    format!(
        r#"<label class="image-upload" data-action="upload" data-block-id="{}">{}<span>Click to upload an image</span><input type="file" accept="image/*" hidden></label>"#,
        escape(id.as_str()),
        icon("image")
    )
}
