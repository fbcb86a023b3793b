/// Frustum: camera view/projection pair with memoized derived data.
///
/// Derived values (view-projection, its inverse, the normal matrix, the six
/// clipping planes and the eight corners) are computed on first read and
/// kept until the next mutation. Every mutation resets all of them at once,
/// so no reader can observe a stale value.
///
/// Planes are (A, B, C, D) with A·x + B·y + C·z + D = 0, unit normal
/// pointing inward. Projection follows GL clip space (z in [-1, 1]).

use std::cell::OnceCell;
use glam::{Mat3, Mat4, Vec3, Vec4};
use super::plane::Plane;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// NDC cube corners, near face first (counter-clockwise from bottom-left)
const CUBE: [Vec4; 8] = [
    Vec4::new(-1.0, -1.0, -1.0, 1.0),
    Vec4::new(1.0, -1.0, -1.0, 1.0),
    Vec4::new(1.0, 1.0, -1.0, 1.0),
    Vec4::new(-1.0, 1.0, -1.0, 1.0),
    Vec4::new(-1.0, -1.0, 1.0, 1.0),
    Vec4::new(1.0, -1.0, 1.0, 1.0),
    Vec4::new(1.0, 1.0, 1.0, 1.0),
    Vec4::new(-1.0, 1.0, 1.0, 1.0),
];

#[derive(Debug, Clone, Default)]
struct Derived {
    view_proj: OnceCell<Mat4>,
    inv_view_proj: OnceCell<Mat4>,
    normal: OnceCell<Mat3>,
    planes: OnceCell<[Plane; 6]>,
    corners: OnceCell<[Vec4; 8]>,
}

#[derive(Debug, Clone)]
pub struct Frustum {
    view: Mat4,
    proj: Mat4,
    near: f32,
    far: f32,
    derived: Derived,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

impl Frustum {
    /// Identity view and projection, near = far = 0
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            near: 0.0,
            far: 0.0,
            derived: Derived::default(),
        }
    }

    fn changed(&mut self) {
        self.derived = Derived::default();
    }

    // ===== MUTATORS =====

    /// Perspective projection, `fovy_deg` in degrees
    pub fn proj_set_perspective(&mut self, fovy_deg: f32, aspect: f32, z_near: f32, z_far: f32) {
        self.near = z_near;
        self.far = z_far;
        self.proj = Mat4::perspective_rh_gl(fovy_deg.to_radians(), aspect, z_near, z_far);
        self.changed();
    }

    pub fn view_set_identity(&mut self) {
        self.view = Mat4::IDENTITY;
        self.changed();
    }

    /// `view = view * R(angle_deg, axis)`
    pub fn view_rotate(&mut self, angle_deg: f32, axis: Vec3) {
        self.view *= Mat4::from_axis_angle(axis.normalize(), angle_deg.to_radians());
        self.changed();
    }

    /// `view = view * T(t)`
    pub fn view_translate(&mut self, t: Vec3) {
        self.view *= Mat4::from_translation(t);
        self.changed();
    }

    pub fn view_translate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.view_translate(Vec3::new(x, y, z));
    }

    // ===== READERS =====

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn proj(&self) -> &Mat4 {
        &self.proj
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn view_proj(&self) -> &Mat4 {
        self.derived.view_proj.get_or_init(|| self.proj * self.view)
    }

    pub fn inv_view_proj(&self) -> &Mat4 {
        self.derived.inv_view_proj.get_or_init(|| self.view_proj().inverse())
    }

    /// Inverse-transpose of the upper 3x3 of the view matrix
    pub fn normal(&self) -> &Mat3 {
        self.derived
            .normal
            .get_or_init(|| Mat3::from_mat4(self.view).inverse().transpose())
    }

    /// Clipping planes (Gribb & Hartmann), see the PLANE_* indices
    pub fn planes(&self) -> &[Plane; 6] {
        self.derived.planes.get_or_init(|| {
            let vp = self.view_proj();
            let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];
            let raw = [
                rows[3] + rows[0],
                rows[3] - rows[0],
                rows[3] + rows[1],
                rows[3] - rows[1],
                rows[3] + rows[2],
                rows[3] - rows[2],
            ];
            raw.map(|p| {
                let len = p.truncate().length();
                Plane::from_vec4(if len > 0.0 { p / len } else { p })
            })
        })
    }

    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes()[index]
    }

    /// World-space corners; index order matches `CUBE`
    pub fn corners(&self) -> &[Vec4; 8] {
        self.derived.corners.get_or_init(|| {
            let inv = self.inv_view_proj();
            CUBE.map(|c| {
                let p = *inv * c;
                p / p.w
            })
        })
    }

    /// Corner `index`; out-of-range indices return corner 0
    pub fn corner(&self, index: usize) -> &Vec4 {
        let corners = self.corners();
        corners.get(index).unwrap_or(&corners[0])
    }

    /// Row 0 of the view matrix (camera right axis in world space)
    pub fn x(&self) -> Vec3 {
        self.view.row(0).truncate()
    }

    /// Row 1 of the view matrix (camera up axis in world space)
    pub fn y(&self) -> Vec3 {
        self.view.row(1).truncate()
    }

    /// Row 2 of the view matrix (camera backward axis in world space)
    pub fn z(&self) -> Vec3 {
        self.view.row(2).truncate()
    }

    /// Canonical NDC corner `index` (same fallback rule as `corner`)
    pub fn ndc_corner(index: usize) -> Vec4 {
        CUBE.get(index).copied().unwrap_or(CUBE[0])
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
