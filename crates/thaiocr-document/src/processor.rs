// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document processor: validate, rasterize, recognise, join, write.
//
// One synchronous call chain per document. Any page failure aborts the whole
// document; there is no retry and no partial output.

use std::path::Path;

use thaiocr_core::config::OcrConfig;
use thaiocr_core::error::{OcrError, Result};
use thaiocr_core::types::{DocumentType, ExtractedDocument, Progress, path_extension};
use tracing::{error, info, instrument, warn};

use crate::image::loader::ImageLoader;
use crate::ocr::TesseractEngine;
use crate::pdf::rasterizer::{PdfRasterizer, RasterizedPdf};
use crate::pdf::reader::PdfReader;

/// Extracts text from PDFs and images.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    config: OcrConfig,
    engine: TesseractEngine,
    rasterizer: PdfRasterizer,
}

impl DocumentProcessor {
    /// Resolve tool locations and probe Tesseract.
    ///
    /// # Errors
    ///
    /// Fails with [`OcrError::TesseractUnavailable`] if the OCR engine cannot
    /// be run. Poppler is only checked when a PDF is processed.
    pub fn new(config: OcrConfig) -> Result<Self> {
        let config = config.resolve();
        let engine = TesseractEngine::new(&config)?;
        Ok(Self::with_engine(config, engine))
    }

    /// Build a processor around an already-probed engine.
    pub fn with_engine(config: OcrConfig, engine: TesseractEngine) -> Self {
        let rasterizer = PdfRasterizer::new(&config);
        Self {
            config,
            engine,
            rasterizer,
        }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    pub fn engine(&self) -> &TesseractEngine {
        &self.engine
    }

    /// Check the input's extension against the configured formats.
    ///
    /// Only the path is inspected; the file does not need to exist.
    pub fn validate(&self, input: &Path) -> Result<DocumentType> {
        let ext = path_extension(input);
        if !self.config.is_supported(&ext) {
            return Err(OcrError::UnsupportedFormat(ext));
        }
        DocumentType::from_extension(&ext).ok_or(OcrError::UnsupportedFormat(ext))
    }

    /// Render every page of a PDF to an image.
    ///
    /// The file is only parsed with lopdf when `pdftoppm` rejects it, to
    /// explain the conversion error.
    pub fn convert_pdf_to_images(&self, pdf_path: &Path) -> Result<RasterizedPdf> {
        self.rasterizer.rasterize(pdf_path).map_err(|err| match err {
            OcrError::PdfConversion(detail) => {
                OcrError::PdfConversion(explain_pdf_failure(pdf_path, detail))
            }
            other => other,
        })
    }

    /// Open an image file and recognise its text.
    #[instrument(skip(self), fields(image = %image_path.display()))]
    pub fn process_image(&self, image_path: &Path) -> Result<String> {
        let loaded = ImageLoader::open(image_path)?;
        if loaded.width() == 0 || loaded.height() == 0 {
            warn!("Image has no pixels; OCR will return no text");
        }

        if DocumentType::from_path(image_path) == Some(DocumentType::Bmp) {
            let scratch = tempfile::tempdir().map_err(|err| {
                OcrError::ImageProcessing(format!("failed to create scratch directory: {err}"))
            })?;
            let png = loaded.save_png(scratch.path())?;
            return self.engine.recognize(&png);
        }

        self.engine.recognize(loaded.path())
    }

    /// Extract the text of every page of `input`, reporting progress.
    #[instrument(skip(self, progress), fields(input = %input.display()))]
    pub fn extract(
        &self,
        input: &Path,
        mut progress: impl FnMut(Progress),
    ) -> Result<ExtractedDocument> {
        info!("Processing document: {}", input.display());
        let document_type = self.validate(input)?;
        let mut extracted = ExtractedDocument::new(document_type);

        if document_type.is_pdf() {
            progress(Progress::Rasterizing);
            let rendered = self.convert_pdf_to_images(input)?;
            let total = rendered.len();
            for (index, page) in rendered.pages().iter().enumerate() {
                let current = index + 1;
                info!("Processing page {current}");
                progress(Progress::Page { current, total });
                extracted.push_page(self.engine.recognize(page)?);
            }
        } else {
            progress(Progress::Page {
                current: 1,
                total: 1,
            });
            extracted.push_page(self.process_image(input)?);
        }

        Ok(extracted)
    }

    /// Extract the text of `input` and write it to `output` as UTF-8.
    ///
    /// Missing parent directories of `output` are created.
    pub fn process_document(&self, input: &Path, output: &Path) -> Result<()> {
        self.process_document_with_progress(input, output, |_| {}).map(|_| ())
    }

    /// [`process_document`](Self::process_document) with progress reporting.
    /// Returns the extracted pages that were written.
    pub fn process_document_with_progress(
        &self,
        input: &Path,
        output: &Path,
        mut progress: impl FnMut(Progress),
    ) -> Result<ExtractedDocument> {
        let result = self
            .extract(input, &mut progress)
            .and_then(|extracted| {
                progress(Progress::Writing);
                write_output(output, &extracted.render())?;
                Ok(extracted)
            })
            .map_err(OcrError::into_document);

        match &result {
            Ok(_) => info!("Text saved to: {}", output.display()),
            Err(err) => error!("{err}"),
        }
        result
    }
}

/// Append what lopdf can tell about a PDF that `pdftoppm` refused.
fn explain_pdf_failure(pdf_path: &Path, detail: String) -> String {
    match PdfReader::open(pdf_path) {
        Ok(reader) if reader.is_encrypted() => format!("{detail}; the PDF is encrypted"),
        Ok(reader) => {
            warn!(pages = reader.page_count(), "PDF parses but pdftoppm refused it");
            detail
        }
        Err(OcrError::PdfConversion(reason)) => format!("{detail}; {reason}"),
        Err(_) => detail,
    }
}

fn write_output(output: &Path, text: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, text)?;
    Ok(())
}
