// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rasterizer: renders every page of a PDF to a PNG file with Poppler's
// `pdftoppm`.
//
// Pages are written into a private temporary directory that lives exactly as
// long as the returned `RasterizedPdf`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thaiocr_core::config::OcrConfig;
use thaiocr_core::error::{OcrError, Result};
use tracing::{debug, error, info, instrument};

use crate::tools::{ToolCommand, classify_pdf_failure};

/// File stem prefix handed to `pdftoppm`; it appends `-N.png` per page.
const PAGE_PREFIX: &str = "page";

/// Renders PDF pages to images via `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    command: ToolCommand,
    dpi: u32,
}

impl PdfRasterizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: ToolCommand::new(config.pdftoppm_command()),
            dpi: config.dpi,
        }
    }

    /// Render every page of `pdf_path` to PNG.
    ///
    /// # Errors
    ///
    /// [`OcrError::PopplerUnavailable`] when `pdftoppm` is missing,
    /// [`OcrError::PdfConversion`] for any other failure.
    #[instrument(skip(self), fields(pdf = %pdf_path.display(), dpi = self.dpi))]
    pub fn rasterize(&self, pdf_path: &Path) -> Result<RasterizedPdf> {
        let dir = tempfile::Builder::new()
            .prefix("thai-ocr-pages-")
            .tempdir()
            .map_err(|err| {
                OcrError::PdfConversion(format!("failed to create scratch directory: {err}"))
            })?;
        let prefix = dir.path().join(PAGE_PREFIX);

        let dpi = self.dpi.to_string();
        self.command
            .run([
                OsStr::new("-r"),
                OsStr::new(&dpi),
                OsStr::new("-png"),
                pdf_path.as_os_str(),
                prefix.as_os_str(),
            ])
            .map_err(|failure| {
                let err = classify_pdf_failure(&failure);
                error!(%failure, "pdftoppm failed");
                err
            })?;

        let pages = collect_pages(dir.path())?;
        if pages.is_empty() {
            return Err(OcrError::PdfConversion(format!(
                "no pages rendered from {}",
                pdf_path.display()
            )));
        }

        info!(pages = pages.len(), "PDF rasterized");
        Ok(RasterizedPdf { _dir: dir, pages })
    }
}

/// Page images rendered from one PDF, in page order.
#[derive(Debug)]
pub struct RasterizedPdf {
    // Removing the directory deletes the page files.
    _dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RasterizedPdf {
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// List `page-N.png` files in `dir`, sorted by N.
///
/// `pdftoppm` zero-pads N to the width of the page count, so lexical order
/// already works for one run, but the numeric sort does not depend on it.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|err| {
        OcrError::PdfConversion(format!("failed to list rendered pages: {err}"))
    })?;

    let mut numbered = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| OcrError::PdfConversion(format!("failed to list rendered pages: {err}")))?
            .path();
        match page_number(&path) {
            Some(n) => numbered.push((n, path)),
            None => debug!(path = %path.display(), "ignoring unexpected file"),
        }
    }

    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

/// Extract N from `page-N.png`.
fn page_number(path: &Path) -> Option<usize> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.strip_prefix(PAGE_PREFIX)?.strip_prefix('-')?;
    digits.parse().ok()
}
