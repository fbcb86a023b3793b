/// Plane: a half-space `n·x + d = 0` stored as a Vec4 (nx, ny, nz, d).
///
/// Planes built from three points carry a unit normal. A point P lies on
/// the positive side when `n·P + d > 0`.

use glam::{Vec3, Vec4};

/// Normal length below which a plane is considered degenerate
pub const DEGENERATE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Plane {
    coeffs: Vec4,
}

impl Plane {
    /// Wrap raw plane coefficients, no normalization
    pub fn from_vec4(coeffs: Vec4) -> Self {
        Self { coeffs }
    }

    /// Plane through three points, oriented by the winding p0 → p1 → p2.
    ///
    /// Collinear points produce the zero plane.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let n = (p1 - p0).cross(p2 - p0);
        let len = n.length();
        if len < DEGENERATE_EPSILON {
            return Self::default();
        }
        let d = -n.dot(p0);
        Self { coeffs: n.extend(d) / len }
    }

    /// Raw coefficients (nx, ny, nz, d)
    pub fn as_vec4(&self) -> Vec4 {
        self.coeffs
    }

    pub fn normal(&self) -> Vec3 {
        self.coeffs.truncate()
    }

    pub fn d(&self) -> f32 {
        self.coeffs.w
    }

    pub fn normal_length(&self) -> f32 {
        self.normal().length()
    }

    /// `n·p + d`; the true distance when the normal is unit length
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal().dot(p) + self.coeffs.w
    }

    /// Two vectors spanning the plane (both orthogonal to its normal).
    ///
    /// The dominant axis of the normal (largest absolute component, ties
    /// resolved x, then y, then z) is solved for, the two remaining axes are
    /// set to unit steps. Returns `None` for a degenerate plane.
    pub fn directive_vectors(&self) -> Option<(Vec3, Vec3)> {
        let len = self.normal_length();
        if len < DEGENERATE_EPSILON {
            return None;
        }
        let n = self.normal() / len;
        let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());

        let pair = if ax >= ay && ax >= az {
            (
                Vec3::new(-n.y / n.x, 1.0, 0.0),
                Vec3::new(-n.z / n.x, 0.0, 1.0),
            )
        } else if ay >= az {
            (
                Vec3::new(1.0, -n.x / n.y, 0.0),
                Vec3::new(0.0, -n.z / n.y, 1.0),
            )
        } else {
            (
                Vec3::new(1.0, 0.0, -n.x / n.z),
                Vec3::new(0.0, 1.0, -n.y / n.z),
            )
        };
        Some(pair)
    }
}

impl From<Vec4> for Plane {
    fn from(coeffs: Vec4) -> Self {
        Self::from_vec4(coeffs)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
