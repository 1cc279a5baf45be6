//! `carousel` binary: terminal carousel demo.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use carousel_tui::{Cli, run};
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Logs go to a file because the terminal is drawn over. Without
/// `--log-file` logging stays off.
fn init_logger(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;

    if std::env::var("RUST_LOG").is_err() {
        Builder::new()
            .target(Target::Pipe(Box::new(file)))
            .filter_level(LevelFilter::Warn)
            .filter_module("carousel_core", LevelFilter::Debug)
            .filter_module("carousel_tui", LevelFilter::Debug)
            .init();
    } else {
        Builder::from_default_env()
            .target(Target::Pipe(Box::new(file)))
            .init();
        log::warn!("Initializing logger from env");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_file.as_deref())?;
    log::info!("carousel starting: {:?} layout", cli.size_class());
    run(&cli)
}
