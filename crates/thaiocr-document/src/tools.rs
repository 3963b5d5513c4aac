// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External tool invocation and failure classification.
//
// Both Tesseract and `pdftoppm` are run as child processes. Their failures are
// classified by keyword so a missing install surfaces as a remediation hint
// instead of a raw OS error.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use thaiocr_core::error::OcrError;
use thiserror::Error;
use tracing::{debug, instrument};

/// Raw failure from running an external tool.
#[derive(Debug, Error)]
pub enum ToolFailure {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        code: Option<i32>,
        status: String,
        stderr: String,
    },
}

impl ToolFailure {
    /// The binary could not be found or executed at all.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Spawn { source, .. }
                if matches!(source.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
        )
    }

    /// The tool's own diagnostic text, without the program path.
    pub fn detail(&self) -> String {
        match self {
            Self::Spawn { source, .. } => source.to_string(),
            Self::Exit { stderr, .. } => stderr.clone(),
        }
    }
}

/// Captured output of a successful run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// One external executable.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the tool to completion, capturing stdout and stderr.
    #[instrument(skip_all, fields(program = %self.program.display()))]
    pub fn run<I, S>(&self, args: I) -> Result<ToolOutput, ToolFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        debug!(?command, "running external tool");

        let output = command.output().map_err(|source| ToolFailure::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            let code = output.status.code();
            return Err(ToolFailure::Exit {
                program: self.program.display().to_string(),
                code,
                status: describe_exit(code),
                stderr,
            });
        }

        debug!(stdout_len = output.stdout.len(), "external tool finished");
        Ok(ToolOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Map a Tesseract failure onto the domain error.
pub fn classify_ocr_failure(failure: &ToolFailure) -> OcrError {
    let text = failure.detail().to_lowercase();
    if failure.is_not_found() || text.contains("tesseract is not installed") {
        OcrError::tesseract_unavailable()
    } else {
        OcrError::ImageProcessing(failure.to_string())
    }
}

/// Map a `pdftoppm` failure onto the domain error.
pub fn classify_pdf_failure(failure: &ToolFailure) -> OcrError {
    let text = failure.detail().to_lowercase();
    if failure.is_not_found() || text.contains("poppler") {
        OcrError::poppler_unavailable()
    } else {
        OcrError::PdfConversion(failure.to_string())
    }
}
