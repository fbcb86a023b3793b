/// Dust: floating particles inside the light cone.
///
/// Particles live in the cone's local box: xy in [-r, r] (r = base radius),
/// z in [0, length] along the axis, w = animation phase in [0, 2π). The
/// cone basis matrix maps that box to world space; the light clip planes
/// discard the particles outside the cone.

use std::f32::consts::TAU;
use glam::{Mat4, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::assets::AssetSource;
use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::{BufferKind, GraphicsDevice, Primitive, UniformValue, VertexLayout};
use crate::light::{calc_cone_xy, light_clip_planes, ConeLight};
use super::load_program;

/// `count` random particles for a cone of base `radius` and `length`
pub fn dust_particles(count: u32, radius: f32, length: f32, seed: u64) -> Vec<Vec4> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec4::new(
                rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
                rng.gen_range(0.0..=length),
                rng.gen_range(0.0..TAU),
            )
        })
        .collect()
}

/// Cone-local to world: columns are the two base axes, the cone axis and the apex
pub fn cone_basis(light: &ConeLight) -> Mat4 {
    let dir = light.direction();
    let (x, y) = calc_cone_xy(dir);
    Mat4::from_cols(x.extend(0.0), y.extend(0.0), dir.extend(0.0), light.position_h())
}

pub struct Dust<D: GraphicsDevice> {
    vertex_array: D::VertexArray,
    _vertices: D::Buffer,
    program: D::Program,
    count: u32,
}

impl<D: GraphicsDevice> Dust<D> {
    pub fn new(device: &mut D, assets: &dyn AssetSource, light: &ConeLight, count: u32, seed: u64) -> Result<Self> {
        let program = load_program(device, assets, "particles", "", &["particles.vert", "particles.frag"])?;

        let particles = dust_particles(count, light.base_radius(), light.length(), seed);
        let vertices = device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&particles))?;
        let layout = VertexLayout::interleaved(&[(0, 4)]);
        let vertex_array = device.create_vertex_array(&vertices, None, &layout)?;

        Ok(Self {
            vertex_array,
            _vertices: vertices,
            program,
            count,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Upload the cone clip planes and the cone basis
    pub fn set_light(&self, device: &mut D, light: &ConeLight) {
        device.bind_program(Some(&self.program));
        device.set_uniform(
            &self.program,
            "u_ClipPlanes",
            UniformValue::Vec4Array(light_clip_planes(light).to_vec()),
        );
        device.set_uniform(&self.program, "u_ConeMat", UniformValue::Mat4(cone_basis(light)));
        device.bind_program(None);
    }

    /// Draw the particles as points; `time` drives the drift animation (seconds)
    pub fn render(&self, device: &mut D, frustum: &Frustum, time: f32) {
        let program = &self.program;
        device.bind_vertex_array(Some(&self.vertex_array));
        device.bind_program(Some(program));
        device.set_uniform(program, "u_ProjectionMat", UniformValue::Mat4(*frustum.proj()));
        device.set_uniform(program, "u_ViewMat", UniformValue::Mat4(*frustum.view()));
        device.set_uniform(program, "u_Time", UniformValue::Float(time));

        device.draw_arrays(Primitive::Points, 0, self.count);

        device.bind_program(None);
        device.bind_vertex_array(None);
    }
}

#[cfg(test)]
#[path = "dust_tests.rs"]
mod tests;
