// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR (Optical Character Recognition) module for Thai OCR.
//
// Text extraction is delegated to the Tesseract command-line engine:
//
//   tesseract <image> stdout -l <language> --psm <mode>
//
// The engine is probed once with `tesseract --version` at construction time so
// a missing install fails before any document is touched. Thai recognition
// needs the `tha` traineddata installed alongside Tesseract.

use std::ffi::OsStr;
use std::path::Path;

use thaiocr_core::config::OcrConfig;
use thaiocr_core::error::{OcrError, Result};
use tracing::{debug, error, info, instrument};

use crate::tools::{ToolCommand, classify_ocr_failure};

/// Tesseract wrapper configured for one language and segmentation mode.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: ToolCommand,
    language: String,
    psm_mode: u8,
    version: String,
}

impl TesseractEngine {
    /// Locate and probe Tesseract.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::TesseractUnavailable`] with install instructions if
    /// the binary cannot be run.
    #[instrument(skip_all, fields(tesseract = %config.tesseract_command().display()))]
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let command = ToolCommand::new(config.tesseract_command());
        let version = probe_version(&command).inspect_err(|err| {
            error!(%err, "Tesseract is not usable");
        })?;

        info!(%version, language = %config.language, psm = config.psm_mode, "Tesseract ready");
        Ok(Self {
            command,
            language: config.language.clone(),
            psm_mode: config.psm_mode,
            version,
        })
    }

    /// First line of `tesseract --version`, e.g. `tesseract 5.3.4`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn psm_mode(&self) -> u8 {
        self.psm_mode
    }

    /// Recognise the text in one image file.
    ///
    /// Returns the engine's output with surrounding whitespace trimmed.
    #[instrument(skip(self), fields(image = %image.display()))]
    pub fn recognize(&self, image: &Path) -> Result<String> {
        let psm = self.psm_mode.to_string();
        let output = self
            .command
            .run([
                image.as_os_str(),
                OsStr::new("stdout"),
                OsStr::new("-l"),
                OsStr::new(&self.language),
                OsStr::new("--psm"),
                OsStr::new(&psm),
            ])
            .map_err(|failure| {
                let err = classify_ocr_failure(&failure);
                error!(%failure, "tesseract failed");
                err
            })?;

        let text = output.stdout_lossy().trim().to_string();
        debug!(
            line_count = text.lines().count(),
            char_count = text.chars().count(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}

/// Run `tesseract --version` and keep the first line.
///
/// Older releases print the version banner on stderr.
fn probe_version(command: &ToolCommand) -> Result<String> {
    let output = command
        .run(["--version"])
        .map_err(|_| OcrError::tesseract_unavailable())?;

    let stdout = output.stdout_lossy();
    let banner = stdout
        .lines()
        .chain(output.stderr.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("tesseract (unknown version)")
        .to_string();
    Ok(banner)
}
