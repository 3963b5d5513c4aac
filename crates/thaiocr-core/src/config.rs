// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR configuration and external tool discovery.
//
// Tesseract must be reachable via PATH, a well-known install location, or an
// explicit path. PDF input additionally needs Poppler's `pdftoppm`.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Executable name of the OCR engine.
pub const TESSERACT_BIN: &str = "tesseract";

/// Executable name of the Poppler rasterizer.
pub const PDFTOPPM_BIN: &str = "pdftoppm";

/// Extensions accepted when no override is configured.
pub const DEFAULT_FORMATS: [&str; 6] = [".pdf", ".png", ".jpg", ".jpeg", ".tiff", ".bmp"];

#[cfg(windows)]
const DEFAULT_TESSERACT_PATHS: &[&str] = &[r"C:\Program Files\Tesseract-OCR\tesseract.exe"];
#[cfg(not(windows))]
const DEFAULT_TESSERACT_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

#[cfg(windows)]
const DEFAULT_POPPLER_DIR: Option<&str> = Some(r"C:\Program Files\poppler\Library\bin");
#[cfg(not(windows))]
const DEFAULT_POPPLER_DIR: Option<&str> = None;

/// Settings for one OCR run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to the `tesseract` executable. Auto-detected when unset.
    pub tesseract_path: Option<PathBuf>,
    /// Directory containing `pdftoppm`. PATH is used when unset.
    pub poppler_path: Option<PathBuf>,
    /// Tesseract language code (`-l`).
    pub language: String,
    /// Tesseract page segmentation mode (`--psm`). 6 assumes a single
    /// uniform block of text.
    pub psm_mode: u8,
    /// Rasterization resolution for PDF pages.
    pub dpi: u32,
    /// Accepted input extensions, lower-case with a leading dot.
    pub supported_formats: BTreeSet<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            poppler_path: None,
            language: "tha".into(),
            psm_mode: 6,
            dpi: 200,
            supported_formats: DEFAULT_FORMATS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl OcrConfig {
    pub fn with_tesseract_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tesseract_path = Some(path.into());
        self
    }

    pub fn with_poppler_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.poppler_path = Some(dir.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_psm_mode(mut self, psm: u8) -> Self {
        self.psm_mode = psm;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Whether `ext` (with or without the leading dot, any case) is accepted.
    pub fn is_supported(&self, ext: &str) -> bool {
        self.supported_formats.contains(&normalize_extension(ext))
    }

    /// Fill in missing tool locations from PATH and the platform defaults.
    pub fn resolve(self) -> Self {
        self.resolve_with(find_executable, Path::exists)
    }

    /// [`resolve`](Self::resolve) with injectable PATH lookup and existence
    /// checks.
    pub fn resolve_with(
        mut self,
        lookup: impl Fn(&str) -> Option<PathBuf>,
        exists: impl Fn(&Path) -> bool,
    ) -> Self {
        if self.poppler_path.is_none() && lookup(PDFTOPPM_BIN).is_none() {
            if let Some(dir) = DEFAULT_POPPLER_DIR {
                debug!(dir, "pdftoppm not on PATH, falling back to default Poppler dir");
                self.poppler_path = Some(PathBuf::from(dir));
            }
        }

        if self.tesseract_path.is_none() {
            self.tesseract_path = lookup(TESSERACT_BIN).or_else(|| {
                DEFAULT_TESSERACT_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| exists(candidate))
            });
            debug!(path = ?self.tesseract_path, "tesseract location resolved");
        }

        self
    }

    /// The command used to launch Tesseract.
    pub fn tesseract_command(&self) -> PathBuf {
        self.tesseract_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(TESSERACT_BIN))
    }

    /// The command used to launch `pdftoppm`.
    pub fn pdftoppm_command(&self) -> PathBuf {
        match &self.poppler_path {
            Some(dir) => dir.join(executable_name(PDFTOPPM_BIN)),
            None => PathBuf::from(PDFTOPPM_BIN),
        }
    }
}

/// Lower-case an extension and make sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Look up an executable on the current `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    find_executable_in(name, &path_var)
}

/// Look up an executable in an explicit PATH-style search list.
pub fn find_executable_in(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .flat_map(|dir| candidate_names(name).into_iter().map(move |n| dir.join(n)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.BAT;.CMD".into());
    std::iter::once(name.to_string())
        .chain(exts.split(';').filter(|e| !e.is_empty()).map(|e| format!("{name}{}", e.to_lowercase())))
        .collect()
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(windows)]
fn executable_name(name: &str) -> String {
    format!("{name}.exe")
}

#[cfg(not(windows))]
fn executable_name(name: &str) -> String {
    name.to_string()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
