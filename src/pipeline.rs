// src/pipeline.rs
//! Pipeline capability traits and the command runner built on them.
//!
//! Every command is load → transform → compose → deliver. Each stage is a
//! trait so it can be exercised in isolation.

use crate::analytics::{measure_collection, measure_content};
use crate::config::{CommandPlan, EditorConfig, RenderFormat};
use crate::editor::{BlockEditor, EditorEvent, EventOutcome};
use crate::error::AppError;
use crate::formatting::{compose_markdown, render_collection, render_page, PageExport, RenderContext};
use crate::output::{deliver, OutputPlan, OutputReport};
use crate::store::{BlockCollection, EditorWarning};
use crate::upload::FsUploadSource;
use std::cell::Cell;
use std::path::Path;

/// Loads the stored block collection.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn load(&self) -> Result<BlockCollection, AppError>;
}

/// Produces the collection the command writes or renders.
///
/// Editors are single-threaded, so transforms are not required to be `Send`.
#[async_trait::async_trait(?Send)]
pub trait ContentTransform {
    async fn transform(&mut self, content: BlockCollection) -> Result<BlockCollection, AppError>;
}

/// Turns a collection into the command's textual output.
pub trait ContentComposer {
    fn compose(&self, content: &BlockCollection) -> Result<String, AppError>;
}

/// Delivers composed output to its destination.
pub trait ContentDelivery {
    fn deliver(&self, output: String) -> Result<OutputReport, AppError>;
}

/// What one command run did, for the completion message.
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub command: &'static str,
    pub blocks: usize,
    pub changes: usize,
    pub notices: Vec<EditorWarning>,
    pub output: OutputReport,
}

/// Runs the configured command end to end.
pub async fn run_command(config: &EditorConfig) -> Result<CommandReport, AppError> {
    let mut pipeline = CommandPipeline::new(config);

    let content = pipeline.load().await?;
    let content = pipeline.transform(content).await?;
    let output = pipeline.compose(&content)?;
    let report = pipeline.deliver(output)?;

    Ok(CommandReport {
        command: config.plan.name(),
        blocks: content.len(),
        changes: pipeline.changes,
        notices: pipeline.notices,
        output: report,
    })
}

/// Reads a JSON block array from disk and normalizes it.
pub fn read_collection(path: &Path) -> Result<BlockCollection, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let collection: BlockCollection =
        serde_json::from_str(&raw).map_err(|source| AppError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })?;
    let summary = measure_content(&collection);
    log::info!(
        "Loaded {} blocks ({} unknown types) from {}",
        summary.total_blocks,
        summary.unknown_blocks,
        path.display()
    );
    Ok(collection)
}

fn read_events(path: &Path) -> Result<Vec<EditorEvent>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| AppError::JsonParseError {
        path: path.to_path_buf(),
        source,
    })
}

fn serialize_json<T: serde::Serialize>(value: &T, what: &'static str) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|source| AppError::SerializationFailed { what, source })
}

/// The stages for one configured command.
struct CommandPipeline<'a> {
    config: &'a EditorConfig,
    changes: usize,
    notices: Vec<EditorWarning>,
}

impl<'a> CommandPipeline<'a> {
    fn new(config: &'a EditorConfig) -> Self {
        Self {
            config,
            changes: 0,
            notices: Vec::new(),
        }
    }

    fn replay(
        &mut self,
        content: BlockCollection,
        events_path: &Path,
        editor: &mut BlockEditor<'_>,
    ) -> Result<BlockCollection, AppError> {
        let events = read_events(events_path)?;
        log::info!("Replaying {} events", events.len());

        let mut current = content;
        for event in events {
            if let EventOutcome::Changed(next) = editor.handle(&current, event) {
                current = next;
            }
        }
        self.notices.extend(editor.take_notices());
        Ok(current)
    }
}

#[async_trait::async_trait]
impl ContentSource for CommandPipeline<'_> {
    async fn load(&self) -> Result<BlockCollection, AppError> {
        read_collection(&self.config.input)
    }
}

#[async_trait::async_trait(?Send)]
impl ContentTransform for CommandPipeline<'_> {
    async fn transform(&mut self, content: BlockCollection) -> Result<BlockCollection, AppError> {
        let config = self.config;
        let changes = Cell::new(0usize);
        let result = match &config.plan {
            CommandPlan::Apply { events, props } => {
                let mut editor = BlockEditor::new(props.clone(), |_| changes.set(changes.get() + 1));
                self.replay(content, events, &mut editor)
            }
            CommandPlan::Upload { block, file } => {
                let mut editor = BlockEditor::new(Default::default(), |_| {
                    changes.set(changes.get() + 1)
                });
                let outcome = editor.upload(&content, block, &FsUploadSource, file).await;
                self.notices.extend(editor.take_notices());
                match outcome {
                    EventOutcome::Changed(next) => Ok(next),
                    _ => {
                        log::warn!(
                            "Block {} is not an image block in {}",
                            block,
                            config.input.display()
                        );
                        Ok(content)
                    }
                }
            }
            CommandPlan::Normalize | CommandPlan::Render { .. } | CommandPlan::Stats => Ok(content),
        };
        self.changes += changes.get();
        result
    }
}

impl ContentComposer for CommandPipeline<'_> {
    fn compose(&self, content: &BlockCollection) -> Result<String, AppError> {
        match &self.config.plan {
            CommandPlan::Normalize | CommandPlan::Apply { .. } | CommandPlan::Upload { .. } => {
                serialize_json(content, "block collection")
            }
            CommandPlan::Stats => serialize_json(&measure_collection(content), "statistics"),
            CommandPlan::Render {
                format,
                editable,
                title,
                template,
                props,
            } => match format {
                RenderFormat::Html => {
                    let ctx = RenderContext::new(props.language.clone())
                        .with_read_only(!editable || props.read_only)
                        .with_placeholder(props.placeholder.clone())
                        .with_allowed_types(props.allowed_block_types.clone());
                    Ok(render_collection(content, &ctx))
                }
                RenderFormat::Markdown => Ok(compose_markdown(content, &props.language)),
                RenderFormat::Page => render_page(
                    content,
                    &PageExport {
                        title: title.clone(),
                        language: props.language.clone(),
                        template: template.clone(),
                    },
                ),
            },
        }
    }
}

impl ContentDelivery for CommandPipeline<'_> {
    fn deliver(&self, output: String) -> Result<OutputReport, AppError> {
        let plan = OutputPlan::for_destination(self.config.output.clone(), output);
        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }
        Ok(report)
    }
}
