/// ConeLight: a spotlight with a finite cone length.
///
/// The cutoff is a half-angle in degrees. Its tangent is cached eagerly and
/// only `set_spot_cutoff` writes either value, so `tan_phi()` always equals
/// `tan(spot_cutoff())`.

use glam::{Mat4, Vec3, Vec4};
use crate::camera::Frustum;
use crate::graphics_device::{GraphicsDevice, UniformValue};

pub const DEFAULT_SPOT_EXPONENT: f32 = 40.0;
pub const DEFAULT_SPOT_CUTOFF: f32 = 45.0;
pub const DEFAULT_LENGTH: f32 = 5.0;

/// Light uniforms expressed in the camera's view space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniforms {
    pub position: Vec3,
    pub spot_exponent: f32,
    pub spot_direction: Vec3,
    pub spot_cos_cutoff: f32,
}

#[derive(Debug, Clone)]
pub struct ConeLight {
    position: Vec4,
    direction: Vec3,
    spot_exponent: f32,
    spot_cutoff: f32,
    tan_phi: f32,
    length: f32,
}

impl Default for ConeLight {
    fn default() -> Self {
        Self::new()
    }
}

impl ConeLight {
    /// Light at the origin pointing down -Z, 45° cutoff, exponent 40
    pub fn new() -> Self {
        let mut light = Self {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
            spot_exponent: DEFAULT_SPOT_EXPONENT,
            spot_cutoff: 0.0,
            tan_phi: 0.0,
            length: DEFAULT_LENGTH,
        };
        light.set_spot_cutoff(DEFAULT_SPOT_CUTOFF);
        light
    }

    pub fn set_spot_cutoff(&mut self, angle_deg: f32) {
        self.spot_cutoff = angle_deg;
        self.tan_phi = angle_deg.to_radians().tan();
    }

    pub fn set_spot_exponent(&mut self, exponent: f32) {
        self.spot_exponent = exponent;
    }

    /// Stored as given; callers pass a unit vector
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.extend(1.0);
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = length;
    }

    pub fn position(&self) -> Vec3 {
        self.position.truncate()
    }

    pub fn position_h(&self) -> Vec4 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn spot_exponent(&self) -> f32 {
        self.spot_exponent
    }

    pub fn spot_cutoff(&self) -> f32 {
        self.spot_cutoff
    }

    pub fn tan_phi(&self) -> f32 {
        self.tan_phi
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Radius of the cone base
    pub fn base_radius(&self) -> f32 {
        self.length * self.tan_phi
    }

    /// Light-space projection-view matrix used for shadow mapping.
    ///
    /// The view looks from the light position at the world origin with +Y
    /// up; `direction` is not consulted.
    pub fn compute_proj_view_mat(&self) -> Mat4 {
        let proj = Mat4::perspective_rh_gl((self.spot_cutoff * 2.0).to_radians(), 1.0, 1.0, self.length);
        let view = Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    /// Position and spot direction in the view space of `frustum`
    pub fn view_space_uniforms(&self, frustum: &Frustum) -> LightUniforms {
        LightUniforms {
            position: (*frustum.view() * self.position).truncate(),
            spot_exponent: self.spot_exponent,
            spot_direction: *frustum.normal() * self.direction,
            spot_cos_cutoff: self.spot_cutoff.to_radians().cos(),
        }
    }

    /// Upload `u_Light0Pos`, `u_Light0SpotExp`, `u_Light0SpotDir` and
    /// `u_Light0SpotCosCutoff` to `program`
    pub fn bind<D: GraphicsDevice + ?Sized>(&self, device: &mut D, program: &D::Program, frustum: &Frustum) {
        let u = self.view_space_uniforms(frustum);
        device.set_uniform(program, "u_Light0Pos", UniformValue::Vec3(u.position));
        device.set_uniform(program, "u_Light0SpotExp", UniformValue::Float(u.spot_exponent));
        device.set_uniform(program, "u_Light0SpotDir", UniformValue::Vec3(u.spot_direction));
        device.set_uniform(program, "u_Light0SpotCosCutoff", UniformValue::Float(u.spot_cos_cutoff));
    }
}

#[cfg(test)]
#[path = "cone_light_tests.rs"]
mod tests;
