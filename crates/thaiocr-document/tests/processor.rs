// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end checks against the installed Tesseract/Poppler. Each test returns
// early when Tesseract is not available on this machine.

use std::path::Path;

use thaiocr_core::OcrConfig;
use thaiocr_core::config::{PDFTOPPM_BIN, find_executable};
use thaiocr_core::error::OcrError;
use thaiocr_document::DocumentProcessor;

fn installed_processor() -> Option<DocumentProcessor> {
    match DocumentProcessor::new(OcrConfig::default()) {
        Ok(processor) => Some(processor),
        Err(err) => {
            eprintln!("skipping: {err}");
            None
        }
    }
}

#[test]
fn config_defaults() {
    let config = OcrConfig::default();
    assert_eq!(config.language, "tha");
    assert_eq!(config.psm_mode, 6);
    assert!(config.supported_formats.contains(".pdf"));
    assert!(config.supported_formats.contains(".png"));
}

#[test]
fn unsupported_format() {
    let Some(processor) = installed_processor() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test.unsupported");
    std::fs::write(&input, "").unwrap();

    let err = processor
        .process_document(&input, &dir.path().join("output.txt"))
        .unwrap_err();
    assert!(matches!(err, OcrError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn process_image_with_invalid_path() {
    let Some(processor) = installed_processor() else {
        return;
    };
    let err = processor
        .process_image(Path::new("nonexistent.png"))
        .unwrap_err();
    assert!(matches!(err, OcrError::ImageProcessing(_)));
}

#[test]
fn blank_image_yields_empty_text() {
    let Some(processor) = installed_processor() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blank.png");
    image::GrayImage::from_pixel(200, 100, image::Luma([255])).save(&input).unwrap();

    // Missing `tha` traineddata is an installation problem, not a test failure.
    match processor.process_image(&input) {
        Ok(text) => assert!(text.trim().is_empty(), "unexpected text {text:?}"),
        Err(err) => eprintln!("skipping: {err}"),
    }
}

#[test]
fn broken_pdf_is_conversion_error() {
    let Some(processor) = installed_processor() else {
        return;
    };
    if find_executable(PDFTOPPM_BIN).is_none() {
        eprintln!("skipping: pdftoppm not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    std::fs::write(&input, b"this is not a pdf").unwrap();

    let err = processor
        .process_document(&input, &dir.path().join("broken.txt"))
        .unwrap_err();
    assert!(matches!(err.root(), OcrError::PdfConversion(_)), "got {err:?}");
}
