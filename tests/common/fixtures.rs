//! Test fixtures: source images on disk and scratch directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Photo-like gradient with a bright disc, far more than 256 colors.
pub fn photo(width: u32, height: u32) -> image::RgbImage {
    image::RgbImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - width as i64 / 2;
        let dy = y as i64 - height as i64 / 3;
        let in_disc = dx * dx + dy * dy < (width as i64 / 5).pow(2);
        if in_disc {
            image::Rgb([250, 220, (x % 40) as u8 + 10])
        } else {
            image::Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8,
            ])
        }
    })
}

/// Scratch directory holding source images and conversion outputs.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save a [`photo`] under `name`; the format follows the extension.
    pub fn write_photo(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        photo(width, height)
            .save(&path)
            .expect("Failed to write fixture image");
        path
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    pub fn mkdir(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }
}
