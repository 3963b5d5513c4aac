// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware configuration directory resolution.

use std::path::PathBuf;

/// Name of the per-user configuration directory.
const APP_DIR: &str = "thai-ocr";

/// Return the application config directory. It is not created here.
pub fn config_dir() -> PathBuf {
    config_base(|key| std::env::var(key).ok()).join(APP_DIR)
}

/// Base directory from the environment. Empty variables count as unset.
fn config_base(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |key: &str| var(key).filter(|value| !value.is_empty());

    // Try XDG config dir, then the Windows roaming profile, then home
    if let Some(xdg) = var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Some(appdata) = var("APPDATA") {
        return PathBuf::from(appdata);
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from(".")
}
