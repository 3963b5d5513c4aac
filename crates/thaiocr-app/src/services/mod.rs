// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges a front-end (the CLI today) to the document crate.
//
// The worker runs processing off the calling thread; the config store loads
// and persists settings.

pub mod config_dir;
pub mod config_store;
pub mod worker;
