//! Asset access for shader sources and PNG textures.
//!
//! Scene objects read assets through the `AssetSource` trait with paths
//! relative to the asset root (`shaders/table.vert`, `textures/pool.png`).
//! `FileAssets` resolves them on disk; tests substitute an in-memory source.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use image::ImageFormat;
use crate::error::{Error, Result};

/// Environment variable overriding the asset root
pub const ASSETS_ENV_VAR: &str = "BILLIARD_ASSETS";

/// Decoded 8-bit RGB image, bottom row first (GL upload order)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub trait AssetSource {
    /// Full text of a UTF-8 asset
    fn read_text(&self, path: &str) -> Result<String>;

    /// Decode an image asset to RGB8
    fn read_image_rgb(&self, path: &str) -> Result<ImageData>;
}

/// Decode PNG bytes to RGB8, dropping alpha and flipping rows so the first
/// row in memory is the bottom of the image.
pub fn decode_png_rgb(path: &str, bytes: &[u8]) -> Result<ImageData> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| Error::AssetLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let rgb = image::imageops::flip_vertical(&image.to_rgb8());
    Ok(ImageData {
        width: rgb.width(),
        height: rgb.height(),
        pixels: rgb.into_raw(),
    })
}

/// Candidate asset roots in priority order: the environment override, then
/// `<exe dir>/../assets`, `<exe dir>/assets` and `./assets`.
pub fn asset_root_candidates(env_override: Option<OsString>, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(root) = env_override.filter(|v| !v.is_empty()) {
        candidates.push(PathBuf::from(root));
    }
    if let Some(dir) = exe_dir {
        candidates.push(dir.join("..").join("assets"));
        candidates.push(dir.join("assets"));
    }
    candidates.push(PathBuf::from("assets"));
    candidates
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct FileAssets {
    root: PathBuf,
}

impl FileAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First candidate root that contains a `shaders` directory
    pub fn discover() -> Result<Self> {
        let exe = std::env::current_exe().ok();
        let exe_dir = exe.as_deref().and_then(Path::parent);
        let candidates = asset_root_candidates(std::env::var_os(ASSETS_ENV_VAR), exe_dir);

        for candidate in &candidates {
            if candidate.join("shaders").is_dir() {
                crate::engine_info!("billiard::Assets", "Asset root: {}", candidate.display());
                return Ok(Self::new(candidate.clone()));
            }
        }

        let tried = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::InitializationFailed(format!(
            "No asset directory found (set {} or install next to the executable); tried: {}",
            ASSETS_ENV_VAR, tried
        )))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|e| Error::AssetLoad {
            path: full.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl AssetSource for FileAssets {
    fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| Error::AssetLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn read_image_rgb(&self, path: &str) -> Result<ImageData> {
        let bytes = self.read_bytes(path)?;
        let image = decode_png_rgb(path, &bytes)?;
        crate::engine_debug!(
            "billiard::Assets",
            "Loaded {} ({}x{})",
            path,
            image.width,
            image.height
        );
        Ok(image)
    }
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
