/// Game configuration
///
/// All tunables of the scene in one plain struct. `Default` yields the
/// stock billiard scene.

use glam::{Vec2, Vec3};

/// Ball diameter in table units
pub const BALL_DIAMETER: f32 = 0.68;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Shadow map width and height in texels
    pub shadow_map_size: u32,

    /// Camera vertical field of view in degrees
    pub fovy_deg: f32,
    /// Camera near plane
    pub z_near: f32,
    /// Camera far plane
    pub z_far: f32,

    /// Number of camera-facing slices in the light shaft
    pub shaft_planes: u32,
    /// Dust particles inside the light cone
    pub dust_particles: u32,
    /// Seed of the dust particle generator
    pub dust_seed: u64,

    /// Spotlight position (world space)
    pub light_position: Vec3,
    /// Spotlight axis (unit vector)
    pub light_direction: Vec3,
    /// Spotlight cone length
    pub light_length: f32,
    /// Spotlight half-angle in degrees
    pub light_cutoff_deg: f32,

    /// Initial (yaw, pitch) in degrees
    pub initial_rotation: Vec2,
    /// Initial camera distance (negative, along view -Z)
    pub initial_distance: f32,
    /// Degrees of rotation per pixel of mouse drag
    pub mouse_sensitivity: f32,
    /// Allowed pitch range in degrees
    pub pitch_range: (f32, f32),
    /// Allowed distance range
    pub distance_range: (f32, f32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shadow_map_size: 1024,
            fovy_deg: 45.0,
            z_near: 0.1,
            z_far: 20.0,
            shaft_planes: 32,
            dust_particles: 1024,
            dust_seed: 0x5eed_b411,
            light_position: Vec3::new(0.0, 2.0, 2.0),
            light_direction: Vec3::new(0.0, -2.0, -2.0).normalize(),
            light_length: 5.0,
            light_cutoff_deg: 45.0,
            initial_rotation: Vec2::new(0.0, -60.0),
            initial_distance: -2.5,
            mouse_sensitivity: 0.25,
            pitch_range: (-90.0, 0.0),
            distance_range: (-8.0, -1.0),
        }
    }
}
