// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// thaiocr-document: Document processing for Thai OCR.
//
// Runs the external tools that do the real work: Poppler's `pdftoppm` renders
// PDF pages to PNG files and Tesseract recognises the text on each page or
// image. The `DocumentProcessor` ties them together and writes the result.

pub mod image;
pub mod ocr;
pub mod pdf;
pub mod processor;
pub mod tools;

// Re-export the primary structs so callers can use `thaiocr_document::DocumentProcessor` etc.
pub use crate::image::loader::ImageLoader;
pub use crate::ocr::TesseractEngine;
pub use crate::pdf::rasterizer::{PdfRasterizer, RasterizedPdf};
pub use crate::pdf::reader::PdfReader;
pub use crate::processor::DocumentProcessor;
