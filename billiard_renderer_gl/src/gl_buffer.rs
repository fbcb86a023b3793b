/// Buffer - OpenGL implementation of the Buffer trait

use billiard_engine::billiard::render::{Buffer, BufferKind};
use billiard_engine::billiard::Result;
use billiard_engine::engine_err;
use glow::HasContext;
use std::rc::Rc;

/// Static GL buffer object
pub struct GlBuffer {
    gl: Rc<glow::Context>,
    pub(crate) buffer: glow::Buffer,
    kind: BufferKind,
    size: usize,
}

impl GlBuffer {
    /// Upload `data` into a new STATIC_DRAW buffer.
    ///
    /// The upload always goes through ARRAY_BUFFER: element bindings belong
    /// to a vertex array and are made when one is recorded.
    pub(crate) fn new(gl: Rc<glow::Context>, kind: BufferKind, data: &[u8]) -> Result<Self> {
        let buffer = unsafe { gl.create_buffer() }
            .map_err(|e| engine_err!("billiard::gl", "Failed to create {:?} buffer: {}", kind, e))?;

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        Ok(Self {
            gl,
            buffer,
            kind,
            size: data.len(),
        })
    }
}

impl Buffer for GlBuffer {
    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}
