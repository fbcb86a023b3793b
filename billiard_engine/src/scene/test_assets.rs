/// In-memory asset source for scene and game tests
///
/// Any `shaders/*` path resolves to a trivial shader body, any
/// `textures/*` path to a small RGB checker, unless listed as missing.

use std::cell::RefCell;
use crate::assets::{AssetSource, ImageData};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryAssets {
    /// Paths that fail with `Error::AssetLoad`
    pub missing: Vec<String>,
    /// Every path requested so far
    pub requested: RefCell<Vec<String>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, path: &str) -> Result<()> {
        self.requested.borrow_mut().push(path.to_string());
        if self.missing.iter().any(|m| m == path) {
            return Err(Error::AssetLoad {
                path: path.to_string(),
                reason: "not found".to_string(),
            });
        }
        Ok(())
    }
}

impl AssetSource for MemoryAssets {
    fn read_text(&self, path: &str) -> Result<String> {
        self.check(path)?;
        Ok("void main() {}\n".to_string())
    }

    fn read_image_rgb(&self, path: &str) -> Result<ImageData> {
        self.check(path)?;
        Ok(ImageData {
            width: 2,
            height: 2,
            pixels: vec![
                255, 255, 255, 0, 0, 0,
                0, 0, 0, 255, 255, 255,
            ],
        })
    }
}
