// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use thaiocr_core::OcrConfig;

#[derive(Debug, Parser)]
#[command(name = "thai-ocr")]
#[command(version, about = "Thai OCR Document Processor", long_about = None)]
pub struct Cli {
    /// Path to input document (PDF or image)
    pub input: PathBuf,

    /// Path to output text file
    pub output: PathBuf,

    /// Path to tesseract executable
    #[arg(long)]
    pub tesseract_path: Option<PathBuf>,

    /// Directory containing pdftoppm
    #[arg(long)]
    pub poppler_path: Option<PathBuf>,

    /// Tesseract language code (e.g. tha, tha+eng)
    #[arg(long)]
    pub lang: Option<String>,

    /// Tesseract page segmentation mode
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=13))]
    pub psm: Option<u8>,

    /// PDF rasterization resolution
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: Option<u32>,

    /// Config file (default: <config dir>/thai-ocr/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Detailed logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay command-line flags on settings loaded from file.
    pub fn apply(&self, mut config: OcrConfig) -> OcrConfig {
        if let Some(path) = &self.tesseract_path {
            config = config.with_tesseract_path(path);
        }
        if let Some(dir) = &self.poppler_path {
            config = config.with_poppler_path(dir);
        }
        if let Some(lang) = &self.lang {
            config = config.with_language(lang);
        }
        if let Some(psm) = self.psm {
            config = config.with_psm_mode(psm);
        }
        if let Some(dpi) = self.dpi {
            config = config.with_dpi(dpi);
        }
        config
    }
}
