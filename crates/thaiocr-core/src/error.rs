// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error type for Thai OCR.

use thiserror::Error;

/// Install page for Tesseract builds (Windows installers, language data).
pub const TESSERACT_INSTALL_URL: &str = "https://github.com/UB-Mannheim/tesseract/wiki";

/// Install page for Poppler builds that ship `pdftoppm`.
pub const POPPLER_INSTALL_URL: &str = "https://github.com/oschwartz10612/poppler-windows/releases";

/// Top-level error type for all OCR operations.
#[derive(Debug, Error)]
pub enum OcrError {
    // -- Validation --
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    // -- Missing external tools --
    #[error("{0}")]
    TesseractUnavailable(String),

    #[error("{0}")]
    PopplerUnavailable(String),

    // -- Tool failures --
    #[error("Error converting PDF to images: {0}")]
    PdfConversion(String),

    #[error("Error processing image: {0}")]
    ImageProcessing(String),

    /// Any failure raised while processing a whole document.
    #[error("Error processing document: {0}")]
    Document(Box<OcrError>),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OcrError {
    /// Tesseract is missing or cannot be executed.
    pub fn tesseract_unavailable() -> Self {
        Self::TesseractUnavailable(format!(
            "Tesseract is required but not properly configured. Please:\n\
             1. Install Tesseract from: {TESSERACT_INSTALL_URL}\n\
             2. Add it to system PATH or provide its path via --tesseract-path"
        ))
    }

    /// `pdftoppm` is missing or cannot be executed.
    pub fn poppler_unavailable() -> Self {
        Self::PopplerUnavailable(format!(
            "Poppler is required for PDF processing. Please install Poppler and ensure \
             it's in your system PATH, or provide its path via --poppler-path.\n\
             Download Poppler from: {POPPLER_INSTALL_URL}"
        ))
    }

    /// Wrap an error as a document-level failure.
    ///
    /// Validation errors and errors that are already wrapped pass through
    /// unchanged.
    pub fn into_document(self) -> Self {
        match self {
            Self::UnsupportedFormat(_) | Self::Document(_) => self,
            other => Self::Document(Box::new(other)),
        }
    }

    /// The innermost error, with any [`OcrError::Document`] wrappers removed.
    pub fn root(&self) -> &OcrError {
        match self {
            Self::Document(inner) => inner.root(),
            other => other,
        }
    }

    /// Whether this error means a required external tool is missing.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(
            self.root(),
            Self::TesseractUnavailable(_) | Self::PopplerUnavailable(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OcrError>;
