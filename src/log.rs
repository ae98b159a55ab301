use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{filter::Targets, fmt, prelude::*, registry};

use crate::cli::Cli;
use crate::config::DEFAULT_LOG_FILE;
use crate::time::{LocalDateTime, LocalTimeOnly};

/// Initialize the logger based on command-line arguments.
pub fn init_logger(cli_args: &Cli) -> Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    // Format layer for console output (using a writer that coexists with the spinner)
    let console_fmt = fmt::layer()
        .with_target(false)
        .with_timer(LocalTimeOnly)
        .with_writer(indicatif_layer.get_stderr_writer());

    let level = cli_args.log_level.to_level_filter();

    // Quiet mode: suppress all logs except errors
    let console_filter = if cli_args.quiet {
        Targets::new().with_default(LevelFilter::OFF).with_target("nrp", LevelFilter::ERROR)
    } else {
        Targets::new().with_default(LevelFilter::OFF).with_target("nrp", level)
    };

    if !cli_args.log_file {
        registry()
            .with(indicatif_layer)
            .with(console_fmt.with_filter(console_filter))
            .try_init()?;
        return Ok(());
    }

    let log_file_path = cli_args
        .log_file_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // Open log file in append mode
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("cannot open log file {}", log_file_path.display()))?;

    let file_fmt = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalDateTime)
        .with_writer(Mutex::new(file));

    // The file keeps the full record regardless of --quiet
    let file_filter = Targets::new().with_default(LevelFilter::OFF).with_target("nrp", level);

    registry()
        .with(indicatif_layer)
        .with(console_fmt.with_filter(console_filter))
        .with(file_fmt.with_filter(file_filter))
        .try_init()?;

    Ok(())
}
