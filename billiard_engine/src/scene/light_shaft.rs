/// Light shaft: stack of camera-facing slices rendered inside the light cone.
///
/// Slices are unit quads at z in [0, 1]. The vertex shader stretches them
/// over the cone's depth extent along the view axis (`u_ConeMin`,
/// `u_ConeDepth`) and the six light clip planes cut them to the cone.
/// The fragment shader samples the shadow moments, the cookie and the
/// scene depth to shade each slice.

use glam::Vec3;
use crate::assets::AssetSource;
use crate::camera::Frustum;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferKind, GraphicsDevice, IndexType, Primitive, TextureWrap, UniformValue, VertexLayout,
};
use crate::light::{light_clip_planes, shaft_extent, ConeLight};
use super::{load_program, load_texture, BIAS_MATRIX};

/// Quads from the far slice (z = 1) down to the near slice (z = 0), two
/// triangles each.
pub fn shaft_geometry(planes: u32) -> Result<(Vec<Vec3>, Vec<u16>)> {
    if planes < 2 || planes as usize * 4 > u16::MAX as usize + 1 {
        return Err(Error::InvalidResource(format!(
            "Light shaft needs between 2 and 16384 slices, got {}",
            planes
        )));
    }

    let mut vertices = Vec::with_capacity(planes as usize * 4);
    let mut indices = Vec::with_capacity(planes as usize * 6);
    let mut index: u16 = 0;
    for i in (0..planes).rev() {
        let slice = i as f32 / (planes - 1) as f32;
        vertices.extend_from_slice(&[
            Vec3::new(-1.0, -1.0, slice),
            Vec3::new(1.0, -1.0, slice),
            Vec3::new(1.0, 1.0, slice),
            Vec3::new(-1.0, 1.0, slice),
        ]);
        indices.extend_from_slice(&[index, index + 1, index + 2, index, index + 2, index + 3]);
        index = index.wrapping_add(4);
    }
    Ok((vertices, indices))
}

pub struct LightShaft<D: GraphicsDevice> {
    vertex_array: D::VertexArray,
    _vertices: D::Buffer,
    _indices: D::Buffer,
    index_count: u32,
    program: D::Program,
    cookie: D::Texture,
}

impl<D: GraphicsDevice> LightShaft<D> {
    pub fn new(device: &mut D, assets: &dyn AssetSource, planes: u32) -> Result<Self> {
        let program = load_program(device, assets, "shaft", "", &["shaft.vert", "shaft.frag"])?;

        let (vertices, indices) = shaft_geometry(planes)?;
        let vertex_buffer = device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&vertices))?;
        let index_buffer = device.create_buffer(BufferKind::Index, bytemuck::cast_slice(&indices))?;
        let layout = VertexLayout::interleaved(&[(0, 3)]);
        let vertex_array = device.create_vertex_array(&vertex_buffer, Some(&index_buffer), &layout)?;

        let cookie = load_texture(device, assets, "cookie.png", TextureWrap::ClampToEdge)?;

        Ok(Self {
            vertex_array,
            _vertices: vertex_buffer,
            _indices: index_buffer,
            index_count: indices.len() as u32,
            program,
            cookie,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Upload the cone clip planes as `u_ClipPlanes[6]`
    pub fn set_clip_planes(&self, device: &mut D, light: &ConeLight) {
        device.bind_program(Some(&self.program));
        device.set_uniform(
            &self.program,
            "u_ClipPlanes",
            UniformValue::Vec4Array(light_clip_planes(light).to_vec()),
        );
        device.bind_program(None);
    }

    /// Draw the slices. Blending, culling and clip distances are set by the caller.
    pub fn render(
        &self,
        device: &mut D,
        frustum: &Frustum,
        light: &ConeLight,
        shadow_map: &D::Texture,
        scene_depth: &D::Texture,
    ) {
        let extent = shaft_extent(light, frustum.view());
        let depth_bias = BIAS_MATRIX * light.compute_proj_view_mat();

        device.bind_texture(0, Some(shadow_map));
        device.bind_texture(1, Some(&self.cookie));
        device.bind_texture(2, Some(scene_depth));

        let program = &self.program;
        device.bind_program(Some(program));
        device.set_uniform(program, "u_DepthBiasMat", UniformValue::Mat4(depth_bias));
        device.set_uniform(program, "u_InverseViewRotMat", UniformValue::Mat3(extent.inverse_view_rot));
        device.set_uniform(program, "u_ModelViewMat", UniformValue::Mat4(*frustum.view()));
        device.set_uniform(program, "u_ProjectionMat", UniformValue::Mat4(*frustum.proj()));
        device.set_uniform(program, "u_ConePos", UniformValue::Vec3(extent.eye_light_pos));
        device.set_uniform(program, "u_ShadowMap", UniformValue::Int(0));
        device.set_uniform(program, "u_Texture", UniformValue::Int(1));
        device.set_uniform(program, "u_Depth", UniformValue::Int(2));
        device.set_uniform(program, "u_ConeHeight", UniformValue::Float(light.length()));
        device.set_uniform(program, "u_TanPhi", UniformValue::Float(light.tan_phi()));
        device.set_uniform(program, "u_ConeMin", UniformValue::Vec3(extent.cone_min));
        device.set_uniform(program, "u_ConeDepth", UniformValue::Float(extent.cone_depth));
        device.set_uniform(program, "u_NearPlane", UniformValue::Float(frustum.near()));
        device.set_uniform(program, "u_FarPlane", UniformValue::Float(frustum.far()));
        light.bind(device, program, frustum);

        device.bind_vertex_array(Some(&self.vertex_array));
        device.draw_elements(Primitive::Triangles, self.index_count, IndexType::U16);
        device.bind_vertex_array(None);
        device.bind_program(None);
    }
}

#[cfg(test)]
#[path = "light_shaft_tests.rs"]
mod tests;
