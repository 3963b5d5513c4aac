// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for front-ends.
//
// Every technical error is mapped to a dialog title, a plain summary, and a
// suggestion. Missing external tools get their own titles so a front-end can
// point the user at the right installer.

use crate::error::{OcrError, POPPLER_INSTALL_URL, TESSERACT_INSTALL_URL};

/// Dialog title for a missing Tesseract install.
pub const TITLE_MISSING_TESSERACT: &str = "Missing Dependency - Tesseract";
/// Dialog title for a missing Poppler install.
pub const TITLE_MISSING_POPPLER: &str = "Missing Dependency - Poppler";
/// Dialog title for everything else.
pub const TITLE_GENERIC: &str = "Error";

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something must be installed or configured before retrying.
    SetupRequired,
    /// The user picked something we can't handle (wrong format, missing file).
    ActionRequired,
    /// The document itself could not be processed.
    Permanent,
}

/// A human-readable error with a title, summary, and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Shown as the dialog title.
    pub title: &'static str,
    /// Plain summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Drives icon/colour in a UI.
    pub severity: Severity,
}

/// Pick a dialog title from the text of an error message.
pub fn title_for_message(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("tesseract") {
        TITLE_MISSING_TESSERACT
    } else if lower.contains("poppler") {
        TITLE_MISSING_POPPLER
    } else {
        TITLE_GENERIC
    }
}

/// Convert an `OcrError` into a `HumanError`.
pub fn humanize_error(err: &OcrError) -> HumanError {
    let title = title_for_message(&err.to_string());

    match err.root() {
        OcrError::UnsupportedFormat(ext) => HumanError {
            title,
            message: "This type of file isn't supported.".into(),
            suggestion: format!(
                "Choose a PDF or an image (PNG, JPEG, TIFF, BMP). (File type: {})",
                if ext.is_empty() { "none" } else { ext.as_str() }
            ),
            severity: Severity::ActionRequired,
        },

        OcrError::TesseractUnavailable(_) => HumanError {
            title,
            message: "Tesseract OCR is not installed or could not be started.".into(),
            suggestion: format!(
                "Install Tesseract with Thai language data from {TESSERACT_INSTALL_URL}, \
                 then add it to PATH or pass --tesseract-path."
            ),
            severity: Severity::SetupRequired,
        },

        OcrError::PopplerUnavailable(_) => HumanError {
            title,
            message: "Poppler is needed to read PDF files.".into(),
            suggestion: format!(
                "Install Poppler from {POPPLER_INSTALL_URL} and add its bin directory \
                 to PATH, or pass --poppler-path."
            ),
            severity: Severity::SetupRequired,
        },

        OcrError::PdfConversion(_) => HumanError {
            title,
            message: "The PDF couldn't be turned into page images.".into(),
            suggestion: "The file may be damaged or password-protected. Try opening it in a PDF viewer first.".into(),
            severity: Severity::Permanent,
        },

        OcrError::ImageProcessing(detail) => {
            if detail.contains("No such file") || detail.contains("not found") {
                HumanError {
                    title,
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    title,
                    message: "Text recognition didn't work on this image.".into(),
                    suggestion: "The image may be damaged or in an unusual format. Try saving it as PNG first.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        OcrError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                title,
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                title,
                message: "Permission denied.".into(),
                suggestion: "Check the permissions of the input file and the output folder.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                title,
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                severity: Severity::Permanent,
            },
        },

        OcrError::Config(_) | OcrError::Serialization(_) => HumanError {
            title,
            message: "The configuration file couldn't be used.".into(),
            suggestion: "Fix or delete the config file, or pass the settings on the command line.".into(),
            severity: Severity::SetupRequired,
        },

        // root() never returns a wrapper.
        OcrError::Document(inner) => humanize_error(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tesseract_title() {
        let human = humanize_error(&OcrError::tesseract_unavailable().into_document());
        assert_eq!(human.title, TITLE_MISSING_TESSERACT);
        assert_eq!(human.severity, Severity::SetupRequired);
    }

    #[test]
    fn poppler_title() {
        let human = humanize_error(&OcrError::poppler_unavailable());
        assert_eq!(human.title, TITLE_MISSING_POPPLER);
        assert!(human.suggestion.contains(POPPLER_INSTALL_URL));
    }

    #[test]
    fn unsupported_format_is_action_required() {
        let human = humanize_error(&OcrError::UnsupportedFormat(".docx".into()));
        assert_eq!(human.title, TITLE_GENERIC);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains(".docx"));
    }

    #[test]
    fn missing_image_is_action_required() {
        let err = OcrError::ImageProcessing(
            "failed to open nonexistent.png: No such file or directory (os error 2)".into(),
        );
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn titles_from_free_text() {
        assert_eq!(title_for_message("TESSERACT exited"), TITLE_MISSING_TESSERACT);
        assert_eq!(title_for_message("poppler missing"), TITLE_MISSING_POPPLER);
        assert_eq!(title_for_message("disk full"), TITLE_GENERIC);
    }
}
