// src/main.rs

use anyhow::Context;
use clap::Parser;
use content_blocks::config::{CommandLineInput, EditorConfig};
use content_blocks::pipeline::{run_command, CommandReport};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging. Console output goes to stderr so stdout stays clean for
/// command output.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("content_blocks.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("Cannot open log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Reports completion to the user. Silent when output went to stdout.
fn report_completion(config: &EditorConfig, report: &CommandReport) {
    for notice in &report.notices {
        eprintln!("⚠️  {}", notice);
    }

    if config.output.is_none() {
        return;
    }

    for path in report.output.written_files() {
        println!(
            "✓ {}: {} blocks ({} changes) written to {}",
            report.command,
            report.blocks,
            report.changes,
            path.display()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = EditorConfig::resolve(cli).context("Invalid command-line arguments")?;

    let report = run_command(&config)
        .await
        .with_context(|| format!("{} failed for {}", config.plan.name(), config.input.display()))?;

    report_completion(&config, &report);

    Ok(())
}
