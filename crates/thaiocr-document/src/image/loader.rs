// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image loader: decode raster input with the `image` crate before it is
// handed to Tesseract, so unreadable or missing files fail with a clear error
// instead of an opaque engine message.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use thaiocr_core::error::{OcrError, Result};
use tracing::{debug, info, instrument};

/// A decoded input image together with the file it came from.
pub struct ImageLoader {
    path: PathBuf,
    image: DynamicImage,
}

impl ImageLoader {
    /// Load and decode an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|err| {
            OcrError::ImageProcessing(format!("failed to open {}: {}", path.display(), err))
        })?;
        info!(width = image.width(), height = image.height(), "Image loaded");
        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Write the decoded image as PNG into `dir` and return the new path.
    ///
    /// Used when the source file is readable by the `image` crate but its
    /// container is one Tesseract's Leptonica build may not handle.
    pub fn save_png(&self, dir: &Path) -> Result<PathBuf> {
        let name = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());
        let target = dir.join(format!("{name}.png"));
        self.image
            .save_with_format(&target, ImageFormat::Png)
            .map_err(|err| {
                OcrError::ImageProcessing(format!(
                    "failed to save image to {}: {}",
                    target.display(),
                    err
                ))
            })?;
        debug!(target = %target.display(), "Image re-encoded as PNG");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_test_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(8, 4, Rgb([255, 255, 255])).save(&path).unwrap();
        path
    }

    #[test]
    fn opens_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "scan.png");
        let loaded = ImageLoader::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));
        assert_eq!(loaded.path(), path.as_path());
    }

    #[test]
    fn missing_file_is_image_error() {
        let err = ImageLoader::open("nonexistent.png").err().unwrap();
        assert!(matches!(err, OcrError::ImageProcessing(_)));
        assert!(err.to_string().contains("nonexistent.png"));
    }

    #[test]
    fn undecodable_file_is_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(
            ImageLoader::open(&path).err().unwrap(),
            OcrError::ImageProcessing(_)
        ));
    }

    #[test]
    fn bmp_round_trips_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "scan.bmp");
        let out = tempfile::tempdir().unwrap();
        let png = ImageLoader::open(&path).unwrap().save_png(out.path()).unwrap();
        assert!(png.ends_with("scan.png"));
        assert_eq!(ImageLoader::open(&png).unwrap().width(), 8);
    }
}
