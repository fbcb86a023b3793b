/// Ball: icosphere resting on the table, refined further by tessellation shaders.
///
/// The same shader sources build three programs: the lit ball, the shadow
/// caster (`SHADOW_PASS`, writes depth moments) and the scene depth pass
/// (`DEPTH_PASS`). `update` uploads the matrices for all three once per frame.

use glam::{Mat4, Vec3, Vec4};
use crate::assets::AssetSource;
use crate::camera::Frustum;
use crate::config::BALL_DIAMETER;
use crate::error::Result;
use crate::graphics_device::{
    BufferKind, Face, GraphicsDevice, IndexType, PolygonMode, Primitive, TextureWrap, UniformValue,
    VertexLayout,
};
use crate::light::ConeLight;
use super::icosphere::{icosahedron, tessellate};
use super::{load_program, load_texture};

/// CPU subdivision levels applied to the icosahedron
pub const SUBDIVISION_LEVELS: u32 = 2;

const SHADER_FILES: [&str; 4] = ["sphere.vert", "sphere.tesc", "sphere.tese", "sphere.frag"];

/// scale(D/2) · translate(0, 0, 1): unit sphere resting on z = 0
pub fn ball_model_matrix() -> Mat4 {
    Mat4::from_scale(Vec3::splat(BALL_DIAMETER / 2.0)) * Mat4::from_translation(Vec3::Z)
}

pub struct Ball<D: GraphicsDevice> {
    vertex_array: D::VertexArray,
    _vertices: D::Buffer,
    _indices: D::Buffer,
    index_count: u32,
    program: D::Program,
    shadow_program: D::Program,
    depth_program: D::Program,
    albedo: D::Texture,
    model: Mat4,
    line_fill: bool,
}

impl<D: GraphicsDevice> Ball<D> {
    pub fn new(device: &mut D, assets: &dyn AssetSource) -> Result<Self> {
        let program = load_program(device, assets, "ball", "", &SHADER_FILES)?;
        let shadow_program = load_program(device, assets, "ball_shadow", "#define SHADOW_PASS\n", &SHADER_FILES)?;
        let depth_program = load_program(device, assets, "ball_depth", "#define DEPTH_PASS\n", &SHADER_FILES)?;

        let mesh = tessellate(&icosahedron(), SUBDIVISION_LEVELS)?;
        let vertices = device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&mesh.vertices))?;
        let indices = device.create_buffer(BufferKind::Index, bytemuck::cast_slice(&mesh.indices))?;
        let layout = VertexLayout::interleaved(&[(0, 3)]);
        let vertex_array = device.create_vertex_array(&vertices, Some(&indices), &layout)?;

        let albedo = load_texture(device, assets, "ball_albedo.png", TextureWrap::ClampToEdge)?;

        crate::engine_debug!(
            "billiard::Ball",
            "Ball mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );

        Ok(Self {
            vertex_array,
            _vertices: vertices,
            _indices: indices,
            index_count: mesh.indices.len() as u32,
            program,
            shadow_program,
            depth_program,
            albedo,
            model: ball_model_matrix(),
            line_fill: false,
        })
    }

    pub fn model(&self) -> &Mat4 {
        &self.model
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn line_fill(&self) -> bool {
        self.line_fill
    }

    /// Draw as wireframe (`true`) or filled
    pub fn set_line_fill(&mut self, lines: bool) {
        self.line_fill = lines;
    }

    /// Upload per-frame matrices to the three programs
    pub fn update(&self, device: &mut D, frustum: &Frustum, light: &ConeLight) {
        let model_view = *frustum.view() * self.model;
        let camera_world = model_view.inverse() * Vec4::W;
        let camera_world = (camera_world / camera_world.w).truncate();
        let normal = glam::Mat3::from_mat4(model_view).inverse().transpose();
        let mvp = *frustum.proj() * model_view;

        let program = &self.program;
        device.bind_program(Some(program));
        device.set_uniform(program, "u_ModelviewProjectionMat", UniformValue::Mat4(mvp));
        device.set_uniform(program, "u_ModelMat", UniformValue::Mat4(self.model));
        device.set_uniform(program, "u_ModelViewMat", UniformValue::Mat4(model_view));
        device.set_uniform(program, "u_NormalMat", UniformValue::Mat3(normal));
        device.set_uniform(program, "u_CameraWorldPos", UniformValue::Vec3(camera_world));
        device.set_uniform(program, "u_Albedo", UniformValue::Int(0));
        light.bind(device, program, frustum);

        let shadow = &self.shadow_program;
        device.bind_program(Some(shadow));
        device.set_uniform(shadow, "u_ModelMat", UniformValue::Mat4(self.model));
        device.set_uniform(
            shadow,
            "u_ModelviewProjectionMat",
            UniformValue::Mat4(light.compute_proj_view_mat() * self.model),
        );
        device.set_uniform(shadow, "u_CameraWorldPos", UniformValue::Vec3(camera_world));

        let depth = &self.depth_program;
        device.bind_program(Some(depth));
        device.set_uniform(depth, "u_ModelMat", UniformValue::Mat4(self.model));
        device.set_uniform(depth, "u_ModelViewMat", UniformValue::Mat4(model_view));
        device.set_uniform(depth, "u_ModelviewProjectionMat", UniformValue::Mat4(mvp));
        device.set_uniform(depth, "u_CameraWorldPos", UniformValue::Vec3(camera_world));
        device.set_uniform(depth, "u_NearPlane", UniformValue::Float(frustum.near()));
        device.set_uniform(depth, "u_FarPlane", UniformValue::Float(frustum.far()));

        device.bind_program(None);
    }

    /// Shadow caster draw into the shadow moments target
    pub fn render_shadow(&self, device: &mut D) {
        device.bind_program(Some(&self.shadow_program));
        self.draw(device);
        device.bind_program(None);
    }

    /// Depth-only draw into the scene depth target
    pub fn render_depth(&self, device: &mut D) {
        device.bind_program(Some(&self.depth_program));
        self.draw(device);
        device.bind_program(None);
    }

    /// Lit draw with the albedo texture on unit 0
    pub fn render(&self, device: &mut D) {
        device.bind_texture(0, Some(&self.albedo));
        device.bind_program(Some(&self.program));
        self.draw(device);
        device.bind_program(None);
    }

    fn draw(&self, device: &mut D) {
        // faces wind clockwise seen from outside
        device.cull_face(Face::Front);
        device.polygon_mode(if self.line_fill { PolygonMode::Line } else { PolygonMode::Fill });
        device.bind_vertex_array(Some(&self.vertex_array));
        device.draw_elements(Primitive::Patches(3), self.index_count, IndexType::U16);
        device.bind_vertex_array(None);
    }
}

#[cfg(test)]
#[path = "ball_tests.rs"]
mod tests;
