// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thai OCR: command-line document text extraction.
//
// Entry point. Initialises logging, merges the config file with command-line
// flags, and runs the document through a background OCR worker.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use thaiocr_core::error::{OcrError, Result};
use thaiocr_core::human_errors::humanize_error;
use thaiocr_core::types::Progress;

use cli::Cli;
use services::config_store;
use services::worker::{OcrJob, WorkerSlot};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Processing failed: {err}");
            let human = humanize_error(&err);
            tracing::info!(title = human.title, "{} {}", human.message, human.suggestion);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.apply(config_store::load_config(cli.config.as_deref())?);

    if cli.save_config {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(config_store::default_config_path);
        config_store::persist_config(&path, &config)?;
    }

    let mut slot = WorkerSlot::new();
    slot.start(OcrJob {
        config,
        input: cli.input,
        output: Some(cli.output),
    })?;
    let worker = slot
        .take()
        .ok_or_else(|| OcrError::Config("no OCR worker running".into()))?;

    let text = worker.wait(|progress| match progress {
        Progress::Rasterizing => tracing::info!("Rendering PDF pages"),
        Progress::Page { current, total } => tracing::info!("Page {current}/{total}"),
        Progress::Writing => tracing::debug!("Writing output"),
    })?;

    tracing::info!(chars = text.chars().count(), "Done");
    Ok(())
}
