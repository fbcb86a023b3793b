/// Framebuffer - OpenGL implementation of the Framebuffer trait

use billiard_engine::billiard::render::{ColorAttachment, Framebuffer, Renderbuffer, Texture};
use billiard_engine::billiard::{Error, Result};
use billiard_engine::{engine_debug, engine_err, engine_error};
use glow::HasContext;
use std::rc::Rc;

use crate::gl_texture::{GlRenderbuffer, GlTexture};

/// Readable name of a `glCheckFramebufferStatus` result
pub fn status_name(status: u32) -> String {
    let name = match status {
        glow::FRAMEBUFFER_COMPLETE => "GL_FRAMEBUFFER_COMPLETE",
        glow::FRAMEBUFFER_UNDEFINED => "GL_FRAMEBUFFER_UNDEFINED",
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
        glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
        glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
        glow::FRAMEBUFFER_UNSUPPORTED => "GL_FRAMEBUFFER_UNSUPPORTED",
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => "GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS",
        _ => return format!("framebuffer status 0x{:04X}", status),
    };
    name.to_string()
}

pub struct GlFramebuffer {
    gl: Rc<glow::Context>,
    pub(crate) framebuffer: glow::Framebuffer,
    label: String,
    width: u32,
    height: u32,
}

impl GlFramebuffer {
    /// Attach `color` to COLOR_ATTACHMENT0 and `depth_stencil` to
    /// DEPTH_STENCIL_ATTACHMENT, then check completeness.
    ///
    /// Leaves the default framebuffer bound.
    pub(crate) fn new(
        gl: Rc<glow::Context>,
        label: &str,
        color: ColorAttachment<'_, GlTexture, GlRenderbuffer>,
        depth_stencil: Option<&GlTexture>,
    ) -> Result<Self> {
        let (width, height) = match color {
            ColorAttachment::Texture(t) => (t.info().width, t.info().height),
            ColorAttachment::Renderbuffer(r) => (r.width(), r.height()),
        };
        if let Some(depth) = depth_stencil {
            if (depth.info().width, depth.info().height) != (width, height) {
                return Err(Error::InvalidResource(format!(
                    "Framebuffer '{}' mixes {}x{} color with {}x{} depth",
                    label,
                    width,
                    height,
                    depth.info().width,
                    depth.info().height
                )));
            }
        }

        let framebuffer = unsafe { gl.create_framebuffer() }
            .map_err(|e| engine_err!("billiard::gl", "Failed to create framebuffer '{}': {}", label, e))?;
        // owned from here so every early return deletes it
        let fb = Self {
            gl,
            framebuffer,
            label: label.to_string(),
            width,
            height,
        };

        let status = unsafe {
            let gl = &fb.gl;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            match color {
                ColorAttachment::Texture(t) => gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    t.target,
                    Some(t.texture),
                    0,
                ),
                ColorAttachment::Renderbuffer(r) => gl.framebuffer_renderbuffer(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::RENDERBUFFER,
                    Some(r.renderbuffer),
                ),
            }
            if let Some(depth) = depth_stencil {
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::DEPTH_STENCIL_ATTACHMENT,
                    depth.target,
                    Some(depth.texture),
                    0,
                );
            }
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            status
        };

        if status != glow::FRAMEBUFFER_COMPLETE {
            let name = status_name(status);
            engine_error!("billiard::gl", "Framebuffer '{}' incomplete: {}", label, name);
            return Err(Error::FramebufferIncomplete(format!("{}: {}", label, name)));
        }

        engine_debug!("billiard::gl", "Framebuffer '{}' complete ({}x{})", label, width, height);
        Ok(fb)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Framebuffer for GlFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.framebuffer);
        }
    }
}

#[cfg(test)]
#[path = "gl_framebuffer_tests.rs"]
mod tests;
