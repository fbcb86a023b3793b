/// Render targets: a framebuffer together with the storage it renders into.
///
/// Each target owns its attachments. The framebuffer field comes first so
/// it is released before the textures it references.

use crate::error::Result;
use crate::graphics_device::{
    ColorAttachment, GraphicsDevice, TextureDesc, TextureFormat, TextureTarget,
};

// ===== SHADOW TARGET =====

/// Square target storing variance shadow moments: RGBA32F color texture
/// plus a 2D depth/stencil texture
pub struct ShadowTarget<D: GraphicsDevice> {
    framebuffer: D::Framebuffer,
    moments: D::Texture,
    _depth: D::Texture,
    size: u32,
}

impl<D: GraphicsDevice> ShadowTarget<D> {
    pub fn new(device: &mut D, label: &str, size: u32) -> Result<Self> {
        let moments = device.create_texture(&TextureDesc::color_map(
            &format!("{}_moments", label),
            TextureFormat::Rgba32F,
            size,
            size,
        ))?;
        let depth = device.create_texture(&TextureDesc::depth_map(
            &format!("{}_depth", label),
            TextureTarget::Texture2D,
            size,
            size,
        ))?;
        let framebuffer = device.create_framebuffer(label, ColorAttachment::Texture(&moments), Some(&depth))?;

        crate::engine_debug!("billiard::RenderTarget", "Created '{}' ({}x{})", label, size, size);
        Ok(Self {
            framebuffer,
            moments,
            _depth: depth,
            size,
        })
    }

    pub fn framebuffer(&self) -> &D::Framebuffer {
        &self.framebuffer
    }

    /// Color attachment holding (depth, depth²) moments
    pub fn moments(&self) -> &D::Texture {
        &self.moments
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

// ===== SCENE DEPTH TARGET =====

/// Window-sized depth target: RGBA8 color renderbuffer (never written)
/// plus a rectangle depth/stencil texture sampled by the light shaft
pub struct SceneDepthTarget<D: GraphicsDevice> {
    framebuffer: D::Framebuffer,
    _color: D::Renderbuffer,
    depth: D::Texture,
    width: u32,
    height: u32,
}

impl<D: GraphicsDevice> SceneDepthTarget<D> {
    pub fn new(device: &mut D, label: &str, width: u32, height: u32) -> Result<Self> {
        let color = device.create_renderbuffer(TextureFormat::Rgba8, width, height)?;
        let depth = device.create_texture(&TextureDesc::depth_map(
            &format!("{}_depth", label),
            TextureTarget::Rectangle,
            width,
            height,
        ))?;
        let framebuffer = device.create_framebuffer(label, ColorAttachment::Renderbuffer(&color), Some(&depth))?;

        crate::engine_debug!("billiard::RenderTarget", "Created '{}' ({}x{})", label, width, height);
        Ok(Self {
            framebuffer,
            _color: color,
            depth,
            width,
            height,
        })
    }

    pub fn framebuffer(&self) -> &D::Framebuffer {
        &self.framebuffer
    }

    pub fn depth(&self) -> &D::Texture {
        &self.depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
