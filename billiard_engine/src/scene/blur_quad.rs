/// Blur quad: full-target quad for the separable shadow map blur.
///
/// Two programs share `blur.vert/.frag`, one per direction. The quad is
/// drawn in an orthographic projection spanning the shadow map in texels.

use glam::Mat4;
use crate::assets::AssetSource;
use crate::error::Result;
use crate::graphics_device::{BufferKind, GraphicsDevice, Primitive, UniformValue, VertexLayout};
use super::load_program;

/// Blur direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurAxis {
    Vertical,
    Horizontal,
}

/// Position (xyz) and uv of the four quad corners, counter-clockwise
pub fn blur_quad_vertices(size: f32) -> [[f32; 5]; 4] {
    [
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [size, 0.0, 0.0, 1.0, 0.0],
        [size, size, 0.0, 1.0, 1.0],
        [0.0, size, 0.0, 0.0, 1.0],
    ]
}

pub struct BlurQuad<D: GraphicsDevice> {
    vertex_array: D::VertexArray,
    _vertices: D::Buffer,
    vertical: D::Program,
    horizontal: D::Program,
}

impl<D: GraphicsDevice> BlurQuad<D> {
    /// Build both blur programs for a square target of `size` texels
    pub fn new(device: &mut D, assets: &dyn AssetSource, size: u32) -> Result<Self> {
        let files = ["blur.vert", "blur.frag"];
        let vertical = load_program(device, assets, "blur_vertical", "#define BLUR_VERTICALLY\n", &files)?;
        let horizontal = load_program(device, assets, "blur_horizontal", "#define BLUR_HORIZONTALLY\n", &files)?;

        let sizef = size as f32;
        let vertices = device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&blur_quad_vertices(sizef)))?;
        let layout = VertexLayout::interleaved(&[(0, 3), (1, 2)]);
        let vertex_array = device.create_vertex_array(&vertices, None, &layout)?;

        let proj = Mat4::orthographic_rh_gl(0.0, sizef, 0.0, sizef, -1.0, 1.0);
        for program in [&vertical, &horizontal] {
            device.bind_program(Some(program));
            device.set_uniform(program, "u_Texture", UniformValue::Int(0));
            device.set_uniform(program, "u_ModelviewProjectionMat", UniformValue::Mat4(proj));
        }
        device.bind_program(None);

        Ok(Self {
            vertex_array,
            _vertices: vertices,
            vertical,
            horizontal,
        })
    }

    /// Bind the quad geometry for a run of blur draws
    pub fn bind(&self, device: &mut D) {
        device.bind_vertex_array(Some(&self.vertex_array));
    }

    /// Blur `source` along `axis` into the currently bound target.
    /// The quad must be bound.
    pub fn draw(&self, device: &mut D, axis: BlurAxis, source: &D::Texture) {
        let program = match axis {
            BlurAxis::Vertical => &self.vertical,
            BlurAxis::Horizontal => &self.horizontal,
        };
        device.bind_program(Some(program));
        device.bind_texture(0, Some(source));
        device.draw_arrays(Primitive::TriangleFan, 0, 4);
    }
}

#[cfg(test)]
#[path = "blur_quad_tests.rs"]
mod tests;
