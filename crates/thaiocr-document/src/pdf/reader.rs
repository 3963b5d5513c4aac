// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: structural inspection of input PDFs using the `lopdf` crate.
//
// Rendering is left to `pdftoppm`. This reader is only consulted after it
// refuses a file, to say whether the PDF is encrypted or structurally broken.

use std::path::Path;

use lopdf::Document;
use thaiocr_core::error::{OcrError, Result};
use tracing::{debug, info, instrument};

/// Read-only view of a PDF's page tree.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Inspecting PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            OcrError::PdfConversion(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[cfg(test)]
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            OcrError::PdfConversion(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Whether the document is encrypted (pdftoppm will likely refuse it).
    pub fn is_encrypted(&self) -> bool {
        self.document.is_encrypted()
    }
}
