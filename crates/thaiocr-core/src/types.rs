// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Thai OCR.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::normalize_extension;

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Pdf,
    Png,
    Jpeg,
    Tiff,
    Bmp,
}

impl DocumentType {
    /// Infer document type from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match normalize_extension(ext).as_str() {
            ".pdf" => Some(Self::Pdf),
            ".png" => Some(Self::Png),
            ".jpg" | ".jpeg" => Some(Self::Jpeg),
            ".tif" | ".tiff" => Some(Self::Tiff),
            ".bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Infer document type from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether pages must be rasterized before OCR.
    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

/// Lower-cased extension of `path` with a leading dot, or `""` if it has none.
pub fn path_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// OCR output for a single page (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub number: usize,
    pub text: String,
}

/// All text extracted from one input document, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub document_type: DocumentType,
    pub pages: Vec<PageText>,
}

impl ExtractedDocument {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            pages: Vec::new(),
        }
    }

    pub fn push_page(&mut self, text: String) {
        let number = self.pages.len() + 1;
        self.pages.push(PageText { number, text });
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Render the final output text.
    ///
    /// PDF pages each get an `=== Page N ===` header and a trailing newline,
    /// and are joined with a blank line. Image input is written verbatim.
    pub fn render(&self) -> String {
        if self.document_type.is_pdf() {
            self.pages
                .iter()
                .map(|page| format!("=== Page {} ===\n{}\n", page.number, page.text))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            self.pages
                .iter()
                .map(|page| page.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Progress notifications emitted while a document is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// PDF pages are being rendered to images.
    Rasterizing,
    /// OCR started on page `current` of `total`.
    Page { current: usize, total: usize },
    /// The output text is being written.
    Writing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping() {
        assert_eq!(DocumentType::from_extension("PDF"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension(".jpg"), Some(DocumentType::Jpeg));
        assert_eq!(DocumentType::from_extension(".jpeg"), Some(DocumentType::Jpeg));
        assert_eq!(DocumentType::from_extension(".docx"), None);
        assert_eq!(
            DocumentType::from_path(Path::new("/scans/page.TIFF")),
            Some(DocumentType::Tiff)
        );
        assert_eq!(DocumentType::from_path(Path::new("README")), None);
    }

    #[test]
    fn path_extension_normalizes() {
        assert_eq!(path_extension(Path::new("a/b/Scan.PNG")), ".png");
        assert_eq!(path_extension(Path::new("noext")), "");
    }

    #[test]
    fn pdf_render_has_page_headers() {
        let mut doc = ExtractedDocument::new(DocumentType::Pdf);
        doc.push_page("สวัสดี".into());
        doc.push_page("second".into());
        assert_eq!(
            doc.render(),
            "=== Page 1 ===\nสวัสดี\n\n=== Page 2 ===\nsecond\n"
        );
    }

    #[test]
    fn image_render_is_verbatim() {
        let mut doc = ExtractedDocument::new(DocumentType::Png);
        doc.push_page("ภาษาไทย".into());
        assert_eq!(doc.render(), "ภาษาไทย");
        assert_eq!(doc.page_count(), 1);
    }
}
