// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON persistence for `OcrConfig`.

use std::path::{Path, PathBuf};

use thaiocr_core::OcrConfig;
use thaiocr_core::error::Result;
use tracing::{debug, info};

use super::config_dir;

const CONFIG_FILE: &str = "config.json";

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    config_dir::config_dir().join(CONFIG_FILE)
}

/// Load settings.
///
/// An explicit `path` must exist. Without one, the default file is used if
/// present and built-in defaults otherwise. A malformed file is an error in
/// both cases.
pub fn load_config(path: Option<&Path>) -> Result<OcrConfig> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => {
            let default = default_config_path();
            if !default.exists() {
                debug!(path = %default.display(), "no config file, using defaults");
                return Ok(OcrConfig::default());
            }
            default
        }
    };

    let data = std::fs::read_to_string(&path)?;
    let config = serde_json::from_str(&data)?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Write settings as pretty-printed JSON, creating the directory if needed.
pub fn persist_config(path: &Path, config: &OcrConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "config saved");
    Ok(())
}
