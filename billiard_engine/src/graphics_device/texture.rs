/// Texture trait, texture descriptor, and texture info

use crate::error::{Error, Result};

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    /// GL_TEXTURE_2D, normalized coordinates
    Texture2D,
    /// GL_TEXTURE_RECTANGLE, texel coordinates, no mipmaps
    Rectangle,
}

/// Texture and renderbuffer storage formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGB, used by decoded PNG images
    Rgb8,
    /// 8-bit RGBA
    Rgba8,
    /// 32-bit float RGBA, used for shadow moments
    Rgba32F,
    /// Packed 24-bit depth + 8-bit stencil
    Depth24Stencil8,
}

impl TextureFormat {
    /// Bytes per texel for CPU-side upload data
    pub fn bytes_per_texel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
            TextureFormat::Rgba32F => 16,
            TextureFormat::Depth24Stencil8 => 4,
        }
    }

    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::Depth24Stencil8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug name, shows up in logs
    pub label: String,
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Min and mag filter
    pub filter: TextureFilter,
    /// Wrap mode on S and T
    pub wrap: TextureWrap,
    /// Enable depth comparison (COMPARE_REF_TO_TEXTURE, LEQUAL)
    pub depth_compare: bool,
    /// Optional texel data, bottom row first
    pub data: Option<Vec<u8>>,
}

impl TextureDesc {
    /// Linear-filtered, edge-clamped color attachment
    pub fn color_map(label: &str, format: TextureFormat, width: u32, height: u32) -> Self {
        Self {
            label: label.to_string(),
            target: TextureTarget::Texture2D,
            width,
            height,
            format,
            filter: TextureFilter::Linear,
            wrap: TextureWrap::ClampToEdge,
            depth_compare: false,
            data: None,
        }
    }

    /// Nearest-filtered depth/stencil texture with depth comparison enabled
    pub fn depth_map(label: &str, target: TextureTarget, width: u32, height: u32) -> Self {
        Self {
            label: label.to_string(),
            target,
            width,
            height,
            format: TextureFormat::Depth24Stencil8,
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToEdge,
            depth_compare: true,
            data: None,
        }
    }

    /// Linear-filtered RGB texture from decoded image data
    pub fn rgb_image(label: &str, width: u32, height: u32, pixels: Vec<u8>, wrap: TextureWrap) -> Self {
        Self {
            label: label.to_string(),
            target: TextureTarget::Texture2D,
            width,
            height,
            format: TextureFormat::Rgb8,
            filter: TextureFilter::Linear,
            wrap,
            depth_compare: false,
            data: Some(pixels),
        }
    }

    /// Check dimensions and upload size before touching the GPU
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidResource(format!(
                "Texture '{}' has empty size {}x{}",
                self.label, self.width, self.height
            )));
        }
        if let Some(data) = &self.data {
            let expected = self.width as usize * self.height as usize * self.format.bytes_per_texel();
            if data.len() != expected {
                return Err(Error::InvalidResource(format!(
                    "Texture '{}' expects {} bytes of data, got {}",
                    self.label,
                    expected,
                    data.len()
                )));
            }
        }
        if self.depth_compare && !self.format.is_depth() {
            return Err(Error::InvalidResource(format!(
                "Texture '{}' enables depth comparison on a color format",
                self.label
            )));
        }
        Ok(())
    }

    pub fn info(&self) -> TextureInfo {
        TextureInfo {
            target: self.target,
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., GlTexture).
/// The texture is destroyed when dropped.
pub trait Texture {
    fn info(&self) -> &TextureInfo;
}

/// Renderbuffer resource trait (color storage that is never sampled)
pub trait Renderbuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
