/// Table: the 10x10 felt quad at z = 0.
///
/// Drawn twice per frame: depth-only into the scene depth target, then lit,
/// textured and shadowed by the variance shadow map.

use crate::assets::AssetSource;
use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::{
    BufferKind, Capability, Face, GraphicsDevice, Primitive, TextureWrap, UniformValue, VertexLayout,
};
use crate::light::ConeLight;
use super::{load_program, load_texture, BIAS_MATRIX};

const HALF_WIDTH: f32 = 5.0;
const HALF_HEIGHT: f32 = 5.0;
/// Texture repeats across the table
const UV_REPEAT: f32 = 10.0;

/// Interleaved position (3), normal (3), uv (2)
pub(crate) fn table_vertices() -> [[f32; 8]; 4] {
    [
        [-HALF_WIDTH, -HALF_HEIGHT, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        [HALF_WIDTH, -HALF_HEIGHT, 0.0, 0.0, 0.0, 1.0, UV_REPEAT, 0.0],
        [HALF_WIDTH, HALF_HEIGHT, 0.0, 0.0, 0.0, 1.0, UV_REPEAT, UV_REPEAT],
        [-HALF_WIDTH, HALF_HEIGHT, 0.0, 0.0, 0.0, 1.0, 0.0, UV_REPEAT],
    ]
}

pub struct Table<D: GraphicsDevice> {
    vertex_array: D::VertexArray,
    _vertices: D::Buffer,
    program: D::Program,
    depth_program: D::Program,
    texture: D::Texture,
}

impl<D: GraphicsDevice> Table<D> {
    pub fn new(device: &mut D, assets: &dyn AssetSource) -> Result<Self> {
        let program = load_program(device, assets, "table", "", &["table.vert", "table.frag"])?;
        let depth_program = load_program(
            device,
            assets,
            "table_depth",
            "#define DEPTH_PASS\n",
            &["table.vert", "table.frag"],
        )?;

        let vertices = device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&table_vertices()))?;
        let layout = VertexLayout::interleaved(&[(0, 3), (1, 3), (2, 2)]);
        let vertex_array = device.create_vertex_array(&vertices, None, &layout)?;

        let texture = load_texture(device, assets, "pool.png", TextureWrap::Repeat)?;

        Ok(Self {
            vertex_array,
            _vertices: vertices,
            program,
            depth_program,
            texture,
        })
    }

    /// Depth-only draw into the currently bound target
    pub fn render_depth(&self, device: &mut D, frustum: &Frustum) {
        let program = &self.depth_program;
        device.bind_program(Some(program));
        // model is identity: view is the modelview
        device.set_uniform(program, "u_ModelviewProjectionMat", UniformValue::Mat4(*frustum.view_proj()));
        device.set_uniform(program, "u_ModelviewMat", UniformValue::Mat4(*frustum.view()));
        device.set_uniform(program, "u_NearPlane", UniformValue::Float(frustum.near()));
        device.set_uniform(program, "u_FarPlane", UniformValue::Float(frustum.far()));

        device.set_capability(Capability::CullFace, false);
        device.cull_face(Face::Back);
        device.bind_vertex_array(Some(&self.vertex_array));
        device.draw_arrays(Primitive::TriangleFan, 0, 4);
        device.bind_vertex_array(None);
        device.bind_program(None);
    }

    /// Lit draw; `shadow_map` holds the blurred shadow moments
    pub fn render(&self, device: &mut D, frustum: &Frustum, light: &ConeLight, shadow_map: &D::Texture) {
        let program = &self.program;
        let depth_bias = BIAS_MATRIX * light.compute_proj_view_mat();

        device.bind_program(Some(program));
        device.set_uniform(program, "u_ModelviewProjectionMat", UniformValue::Mat4(*frustum.view_proj()));
        device.set_uniform(program, "u_ModelviewMat", UniformValue::Mat4(*frustum.view()));
        device.set_uniform(program, "u_DepthBiasMat", UniformValue::Mat4(depth_bias));
        device.set_uniform(program, "u_NormalMat", UniformValue::Mat3(*frustum.normal()));
        device.set_uniform(program, "u_ShadowMap", UniformValue::Int(0));
        device.set_uniform(program, "u_Texture", UniformValue::Int(1));
        light.bind(device, program, frustum);

        device.cull_face(Face::Back);
        device.bind_vertex_array(Some(&self.vertex_array));
        device.bind_texture(0, Some(shadow_map));
        device.bind_texture(1, Some(&self.texture));
        device.draw_arrays(Primitive::TriangleFan, 0, 4);
        device.bind_vertex_array(None);
        device.bind_program(None);
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
