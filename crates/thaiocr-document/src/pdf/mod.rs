// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page rasterization via `pdftoppm` and structural inspection.

pub mod rasterizer;
pub mod reader;

pub use rasterizer::{PdfRasterizer, RasterizedPdf};
pub use reader::PdfReader;
