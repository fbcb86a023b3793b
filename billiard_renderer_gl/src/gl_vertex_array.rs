/// Vertex array - records a float vertex layout over GL buffers

use billiard_engine::billiard::render::{Buffer, BufferKind, VertexLayout};
use billiard_engine::billiard::{Error, Result};
use billiard_engine::engine_err;
use glow::HasContext;
use std::rc::Rc;

use crate::gl_buffer::GlBuffer;

pub struct GlVertexArray {
    gl: Rc<glow::Context>,
    pub(crate) vertex_array: glow::VertexArray,
}

/// Reject layouts GL would silently misread
pub fn validate_layout(vertices: &GlBuffer, indices: Option<&GlBuffer>, layout: &VertexLayout) -> Result<()> {
    if vertices.kind() != BufferKind::Vertex {
        return Err(Error::InvalidResource("Vertex array source is not a vertex buffer".to_string()));
    }
    if indices.is_some_and(|b| b.kind() != BufferKind::Index) {
        return Err(Error::InvalidResource("Vertex array indices are not an index buffer".to_string()));
    }
    check_attributes(layout)
}

/// Every attribute has 1 to 4 components and fits in the vertex stride
pub fn check_attributes(layout: &VertexLayout) -> Result<()> {
    if layout.attributes.is_empty() {
        return Err(Error::InvalidResource("Vertex layout has no attributes".to_string()));
    }
    for attr in &layout.attributes {
        if !(1..=4).contains(&attr.components) {
            return Err(Error::InvalidResource(format!(
                "Attribute {} has {} components",
                attr.location, attr.components
            )));
        }
        let end = attr.offset + attr.components * std::mem::size_of::<f32>() as u32;
        if layout.stride != 0 && end > layout.stride {
            return Err(Error::InvalidResource(format!(
                "Attribute {} ends at byte {} past the {} byte stride",
                attr.location, end, layout.stride
            )));
        }
    }
    Ok(())
}

impl GlVertexArray {
    pub(crate) fn new(
        gl: Rc<glow::Context>,
        vertices: &GlBuffer,
        indices: Option<&GlBuffer>,
        layout: &VertexLayout,
    ) -> Result<Self> {
        validate_layout(vertices, indices, layout)?;

        let vertex_array = unsafe { gl.create_vertex_array() }
            .map_err(|e| engine_err!("billiard::gl", "Failed to create vertex array: {}", e))?;

        unsafe {
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices.buffer));
            for attr in &layout.attributes {
                gl.enable_vertex_attrib_array(attr.location);
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components as i32,
                    glow::FLOAT,
                    false,
                    layout.stride as i32,
                    attr.offset as i32,
                );
            }
            if let Some(indices) = indices {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(indices.buffer));
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        Ok(Self { gl, vertex_array })
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
        }
    }
}

#[cfg(test)]
#[path = "gl_vertex_array_tests.rs"]
mod tests;
