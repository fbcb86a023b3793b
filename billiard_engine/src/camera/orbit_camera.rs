/// OrbitCamera: mouse-driven camera orbiting the ball.
///
/// Left-drag changes yaw/pitch, the wheel changes the distance. The view is
/// rebuilt from scratch on the target frustum after every change:
/// `translate(0, 0, distance) · rotX(pitch) · rotZ(yaw) · translate(0, 0, -r)`
/// where `r` is the ball radius, so the camera orbits the ball center.

use glam::{Vec2, Vec3};
use crate::config::{GameConfig, BALL_DIAMETER};
use super::Frustum;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// (yaw, pitch) in degrees
    rotation: Vec2,
    distance: f32,
    sensitivity: f32,
    pitch_range: (f32, f32),
    distance_range: (f32, f32),
    cursor: Vec2,
    dragging: bool,
}

impl OrbitCamera {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rotation: config.initial_rotation,
            distance: config.initial_distance,
            sensitivity: config.mouse_sensitivity,
            pitch_range: config.pitch_range,
            distance_range: config.distance_range,
            cursor: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a drag at the last known cursor position
    pub fn mouse_down(&mut self) {
        self.dragging = true;
    }

    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    /// Track the cursor; returns true when the camera moved
    pub fn cursor_moved(&mut self, position: Vec2) -> bool {
        let last = std::mem::replace(&mut self.cursor, position);
        if !self.dragging {
            return false;
        }
        self.rotation -= (last - position) * self.sensitivity;
        self.rotation.y = self.rotation.y.clamp(self.pitch_range.0, self.pitch_range.1);
        true
    }

    /// Zoom by wheel `delta` lines (positive = away from the ball)
    pub fn scrolled(&mut self, delta: f32) {
        self.distance *= 1.0 + delta / 25.0;
        self.distance = self.distance.clamp(self.distance_range.0, self.distance_range.1);
    }

    /// Rebuild the view matrix of `frustum`
    pub fn apply(&self, frustum: &mut Frustum) {
        frustum.view_set_identity();
        frustum.view_translate(Vec3::new(0.0, 0.0, self.distance));
        frustum.view_rotate(self.rotation.y, Vec3::X);
        frustum.view_rotate(self.rotation.x, Vec3::Z);
        frustum.view_translate(Vec3::new(0.0, 0.0, -BALL_DIAMETER / 2.0));
    }
}

#[cfg(test)]
#[path = "orbit_camera_tests.rs"]
mod tests;
