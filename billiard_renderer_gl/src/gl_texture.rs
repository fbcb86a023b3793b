/// Texture and renderbuffer - OpenGL implementations

use billiard_engine::billiard::render::{
    Renderbuffer, Texture, TextureDesc, TextureFilter, TextureFormat, TextureInfo, TextureTarget,
    TextureWrap,
};
use billiard_engine::billiard::{Error, Result};
use billiard_engine::{engine_debug, engine_err};
use glow::HasContext;
use std::rc::Rc;

/// GL upload triple for a storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlFormat {
    pub internal_format: u32,
    pub format: u32,
    pub data_type: u32,
}

pub fn gl_format(format: TextureFormat) -> GlFormat {
    let (internal_format, format, data_type) = match format {
        TextureFormat::Rgb8 => (glow::RGB8, glow::RGB, glow::UNSIGNED_BYTE),
        TextureFormat::Rgba8 => (glow::RGBA8, glow::RGBA, glow::UNSIGNED_BYTE),
        TextureFormat::Rgba32F => (glow::RGBA32F, glow::RGBA, glow::FLOAT),
        TextureFormat::Depth24Stencil8 => (glow::DEPTH24_STENCIL8, glow::DEPTH_STENCIL, glow::UNSIGNED_INT_24_8),
    };
    GlFormat { internal_format, format, data_type }
}

pub fn gl_target(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
        TextureTarget::Rectangle => glow::TEXTURE_RECTANGLE,
    }
}

pub fn gl_filter(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST,
        TextureFilter::Linear => glow::LINEAR,
    }
}

pub fn gl_wrap(wrap: TextureWrap) -> u32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
    }
}

/// Rectangle textures only accept edge clamping
pub fn check_target_wrap(desc: &TextureDesc) -> Result<()> {
    if desc.target == TextureTarget::Rectangle && desc.wrap != TextureWrap::ClampToEdge {
        return Err(Error::InvalidResource(format!(
            "Rectangle texture '{}' must clamp to edge",
            desc.label
        )));
    }
    Ok(())
}

// ===== TEXTURE =====

pub struct GlTexture {
    gl: Rc<glow::Context>,
    pub(crate) texture: glow::Texture,
    pub(crate) target: u32,
    label: String,
    info: TextureInfo,
}

impl GlTexture {
    pub(crate) fn new(gl: Rc<glow::Context>, desc: &TextureDesc) -> Result<Self> {
        desc.validate()?;
        check_target_wrap(desc)?;

        let texture = unsafe { gl.create_texture() }
            .map_err(|e| engine_err!("billiard::gl", "Failed to create texture '{}': {}", desc.label, e))?;
        let target = gl_target(desc.target);
        let format = gl_format(desc.format);

        unsafe {
            gl.bind_texture(target, Some(texture));
            if desc.data.is_some() {
                // RGB rows are not 4-byte aligned
                gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            }
            gl.tex_image_2d(
                target,
                0,
                format.internal_format as i32,
                desc.width as i32,
                desc.height as i32,
                0,
                format.format,
                format.data_type,
                desc.data.as_deref(),
            );
            gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, gl_filter(desc.filter) as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, gl_filter(desc.filter) as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, gl_wrap(desc.wrap) as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, gl_wrap(desc.wrap) as i32);
            if desc.depth_compare {
                gl.tex_parameter_i32(target, glow::TEXTURE_COMPARE_MODE, glow::COMPARE_REF_TO_TEXTURE as i32);
                gl.tex_parameter_i32(target, glow::TEXTURE_COMPARE_FUNC, glow::LEQUAL as i32);
            }
            gl.bind_texture(target, None);
        }

        engine_debug!(
            "billiard::gl",
            "Texture '{}' created: {}x{} {:?}",
            desc.label,
            desc.width,
            desc.height,
            desc.format
        );

        Ok(Self {
            gl,
            texture,
            target,
            label: desc.label.clone(),
            info: desc.info(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Texture for GlTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

// ===== RENDERBUFFER =====

pub struct GlRenderbuffer {
    gl: Rc<glow::Context>,
    pub(crate) renderbuffer: glow::Renderbuffer,
    width: u32,
    height: u32,
}

impl GlRenderbuffer {
    pub(crate) fn new(gl: Rc<glow::Context>, format: TextureFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResource(format!(
                "Renderbuffer has empty size {}x{}",
                width, height
            )));
        }

        let renderbuffer = unsafe { gl.create_renderbuffer() }
            .map_err(|e| engine_err!("billiard::gl", "Failed to create renderbuffer: {}", e))?;

        unsafe {
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                gl_format(format).internal_format,
                width as i32,
                height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }

        Ok(Self { gl, renderbuffer, width, height })
    }
}

impl Renderbuffer for GlRenderbuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for GlRenderbuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_renderbuffer(self.renderbuffer);
        }
    }
}

#[cfg(test)]
#[path = "gl_texture_tests.rs"]
mod tests;
