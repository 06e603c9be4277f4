// src/formatting/direct_template.rs
//! Renders a full HTML page around a collection with a Handlebars template.
//!
//! The built-in template ships with the crate; a template file on disk can
//! replace it. The template sees `title`, `language`, `direction`, `body`
//! (read-only block HTML, inserted unescaped) and `blockCount`.

use super::block_renderer::render_collection;
use super::state::RenderContext;
use crate::error::AppError;
use crate::store::BlockCollection;
use crate::types::LanguageCode;
use handlebars::Handlebars;
use serde_json::json;
use std::path::PathBuf;

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/page.hbs");
const TEMPLATE_NAME: &str = "page";

/// Options for a page export.
#[derive(Debug, Clone, Default)]
pub struct PageExport {
    pub title: String,
    pub language: LanguageCode,
    /// Replaces the built-in template when set.
    pub template: Option<PathBuf>,
}

/// Renders `collection` as a standalone HTML page.
pub fn render_page(collection: &BlockCollection, export: &PageExport) -> Result<String, AppError> {
    log::info!(
        "Rendering page '{}' ({} blocks, language {})",
        export.title,
        collection.len(),
        export.language
    );

    let template_engine = load_template(export)?;
    let body = render_collection(collection, &RenderContext::read_only(export.language.clone()));

    let data = json!({
        "title": export.title,
        "language": export.language.as_str(),
        "direction": export.language.direction().as_attr(),
        "body": body,
        "blockCount": collection.len(),
    });

    let page = template_engine
        .render(TEMPLATE_NAME, &data)
        .map_err(|e| AppError::TemplateRenderError {
            name: template_label(export),
            message: e.to_string(),
        })?;

    log::info!("Page rendered: {} bytes", page.len());
    Ok(page)
}

/// Registers the configured template, or the built-in one.
fn load_template(export: &PageExport) -> Result<Handlebars<'static>, AppError> {
    let template_content = match &export.template {
        Some(path) => std::fs::read_to_string(path).map_err(|e| AppError::TemplateNotFound {
            path: path.display().to_string(),
            source: e,
        })?,
        None => BUILTIN_TEMPLATE.to_string(),
    };

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars
        .register_template_string(TEMPLATE_NAME, &template_content)
        .map_err(|e| AppError::TemplateRenderError {
            name: template_label(export),
            message: e.to_string(),
        })?;

    Ok(handlebars)
}

fn template_label(export: &PageExport) -> String {
    export
        .template
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in page template".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockKind};
    use crate::types::{BlockId, LocalizedText};
    use std::io::Write;

    fn collection() -> BlockCollection {
        BlockCollection::from_blocks(vec![Block::new(
            BlockId::parse("p").unwrap(),
            BlockKind::Paragraph,
        )
        .with_content(LocalizedText::new().with("en", "Hello").with("ar", "مرحبا"))])
    }

    #[test]
    fn builtin_template_wraps_body() {
        let export = PageExport {
            title: "About <us>".to_string(),
            ..PageExport::default()
        };
        let page = render_page(&collection(), &export).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<html lang="en" dir="ltr">"#));
        assert!(page.contains("About &lt;us&gt;"));
        assert!(page.contains(r#"<p class="text-base leading-relaxed" dir="ltr">Hello</p>"#));
        assert!(!page.contains("<textarea"));
    }

    #[test]
    fn arabic_page_is_rtl() {
        let export = PageExport {
            title: String::new(),
            language: LanguageCode::parse("ar").unwrap(),
            template: None,
        };
        let page = render_page(&collection(), &export).unwrap();
        assert!(page.contains(r#"dir="rtl""#));
        assert!(page.contains("مرحبا"));
        assert!(!page.contains("page-title"));
    }

    #[test]
    fn custom_template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{{{blockCount}}}}] {{{{{{body}}}}}}").unwrap();
        let export = PageExport {
            template: Some(file.path().to_path_buf()),
            ..PageExport::default()
        };
        let page = render_page(&collection(), &export).unwrap();
        assert!(page.starts_with("[1] <div class=\"block-editor is-read-only\""));
    }

    #[test]
    fn missing_template_file_is_reported() {
        let export = PageExport {
            template: Some(PathBuf::from("/nonexistent/page.hbs")),
            ..PageExport::default()
        };
        let err = render_page(&collection(), &export).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound { .. }));
    }
}
