// src/config.rs
use crate::constants::{DEFAULT_LANGUAGE, DEFAULT_MAX_BLOCKS, DEFAULT_PLACEHOLDER};
use crate::editor::EditorProps;
use crate::error::AppError;
use crate::model::BlockKind;
use crate::types::{BlockId, LanguageCode, ValidationError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CommandInput,
}

#[derive(Subcommand, Debug)]
pub enum CommandInput {
    /// Normalize a stored block array: fill ids, sort and renumber orders
    Normalize(IoArgs),

    /// Replay a JSON array of editor events against a block array
    Apply {
        #[command(flatten)]
        io: IoArgs,

        /// JSON file holding the events to replay
        #[arg(short, long)]
        events: PathBuf,

        #[command(flatten)]
        editor: EditorArgs,
    },

    /// Render a block array as HTML, Markdown or a full page
    Render {
        #[command(flatten)]
        io: IoArgs,

        #[arg(short, long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat,

        /// Render the editable form instead of static HTML (html format only)
        #[arg(long, default_value_t = false)]
        editable: bool,

        /// Page title (page format only)
        #[arg(long, default_value = "")]
        title: String,

        /// Handlebars template replacing the built-in page template
        #[arg(long)]
        template: Option<PathBuf>,

        #[command(flatten)]
        editor: EditorArgs,
    },

    /// Read an image file into an image block as a data URL
    Upload {
        #[command(flatten)]
        io: IoArgs,

        /// Id of the image block receiving the file
        #[arg(short, long)]
        block: String,

        /// Image file to read
        #[arg(long)]
        file: PathBuf,
    },

    /// Print block counts and missing translations as JSON
    Stats(IoArgs),
}

/// Input and output locations shared by every command.
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// JSON file holding the stored block array
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Editor props settable from the command line.
#[derive(Args, Debug, Clone)]
pub struct EditorArgs {
    /// Active display and edit language
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Maximum number of blocks
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKS)]
    pub max_blocks: usize,

    /// Comma-separated block types offered by the add-block menu (default: all)
    #[arg(long, value_delimiter = ',')]
    pub allowed_types: Vec<String>,

    /// Disable every mutation
    #[arg(long, default_value_t = false)]
    pub read_only: bool,

    /// Placeholder for empty paragraphs
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    pub placeholder: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Html,
    Markdown,
    Page,
}

/// A validated command, ready to run.
#[derive(Debug, Clone)]
pub enum CommandPlan {
    Normalize,
    Apply {
        events: PathBuf,
        props: EditorProps,
    },
    Render {
        format: RenderFormat,
        editable: bool,
        title: String,
        template: Option<PathBuf>,
        props: EditorProps,
    },
    Upload {
        block: BlockId,
        file: PathBuf,
    },
    Stats,
}

impl CommandPlan {
    pub fn name(&self) -> &'static str {
        match self {
            CommandPlan::Normalize => "normalize",
            CommandPlan::Apply { .. } => "apply",
            CommandPlan::Render { .. } => "render",
            CommandPlan::Upload { .. } => "upload",
            CommandPlan::Stats => "stats",
        }
    }
}

/// Resolved configuration: validated and ready to drive the pipeline.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub plan: CommandPlan,
}

impl EditorConfig {
    /// Validates CLI input: language codes, block types, block ids.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let (io, plan) = match cli.command {
            CommandInput::Normalize(io) => (io, CommandPlan::Normalize),
            CommandInput::Apply { io, events, editor } => (
                io,
                CommandPlan::Apply {
                    events,
                    props: editor.into_props()?,
                },
            ),
            CommandInput::Render {
                io,
                format,
                editable,
                title,
                template,
                editor,
            } => (
                io,
                CommandPlan::Render {
                    format,
                    editable,
                    title,
                    template,
                    props: editor.into_props()?,
                },
            ),
            CommandInput::Upload { io, block, file } => (
                io,
                CommandPlan::Upload {
                    block: BlockId::parse(&block)?,
                    file,
                },
            ),
            CommandInput::Stats(io) => (io, CommandPlan::Stats),
        };

        Ok(EditorConfig {
            input: io.input,
            output: io.output,
            verbose: cli.verbose,
            plan,
        })
    }
}

impl EditorArgs {
    fn into_props(self) -> Result<EditorProps, ValidationError> {
        let language = LanguageCode::parse(&self.language)?;

        let allowed_block_types = if self.allowed_types.is_empty() {
            BlockKind::KNOWN.to_vec()
        } else {
            self.allowed_types
                .iter()
                .map(|name| BlockKind::parse_known(name.trim()))
                .collect::<Result<Vec<_>, _>>()?
        };

        if self.max_blocks == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u64::MAX,
            });
        }

        Ok(EditorProps {
            language,
            placeholder: self.placeholder,
            read_only: self.read_only,
            max_blocks: self.max_blocks,
            allowed_block_types,
        })
    }
}
