/// Cone frustum: clipping planes and view-depth extent of a light cone.
///
/// The light shaft is drawn as camera-facing slices clipped by six planes
/// that bound the cone: a near cap just past the apex, a far cap slightly
/// beyond the base, and four side planes through the apex tangent to the
/// cone along two perpendicular axes.

use glam::{Mat3, Mat4, Vec3, Vec4};
use super::ConeLight;

/// Axis candidates closer than this (absolute dot product) to the cone direction are skipped
const MAX_AXIS_DOT: f32 = 0.8;

/// Distance of the near cap from the apex
const NEAR_CAP_OFFSET: f32 = 0.5;

/// The far cap sits this factor times the cone length from the apex
const FAR_CAP_SCALE: f32 = 1.1;

/// Orthonormal basis (x, y) perpendicular to `dir`.
///
/// `y` starts as the first world axis among X, Y, Z that is not within
/// 0.8 (absolute dot product) of `dir`, then both are re-orthogonalized.
pub fn calc_cone_xy(dir: Vec3) -> (Vec3, Vec3) {
    let y = if Vec3::X.dot(dir).abs() < MAX_AXIS_DOT {
        Vec3::X
    } else if Vec3::Y.dot(dir).abs() < MAX_AXIS_DOT {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let x = dir.cross(y);
    let y = x.cross(dir);
    (x.normalize(), y.normalize())
}

/// Plane containing `a` and `b` and parallel to `y`, oriented so that `p`
/// is on its positive side
pub fn calc_plane(a: Vec3, b: Vec3, p: Vec3, y: Vec3) -> Vec4 {
    let n = (b - a).cross(y).normalize();
    let d = -a.dot(n);
    let plane = n.extend(d);
    if n.dot(p) + d > 0.0 {
        plane
    } else {
        -plane
    }
}

/// Six inward-facing planes bounding the cone with apex `a`, unit axis `dir`,
/// half-angle tangent `tan_phi` and length `height`.
///
/// Order: near cap, far cap, +x side, -x side, +y side, -y side.
pub fn calc_cone_frustum(a: Vec3, dir: Vec3, tan_phi: f32, height: f32) -> [Vec4; 6] {
    let near = dir.extend(-(a + dir * NEAR_CAP_OFFSET).dot(dir));

    // center of the far cap
    let s = a + dir * height * FAR_CAP_SCALE;
    let far = (-dir).extend(-s.dot(-dir));

    let (x, y) = calc_cone_xy(dir);
    let r = height * tan_phi;

    [
        near,
        far,
        calc_plane(a, s + x * r, s, y),
        calc_plane(a, s - x * r, s, y),
        calc_plane(a, s + y * r, s, x),
        calc_plane(a, s - y * r, s, x),
    ]
}

/// Clip planes of `light` in world space
pub fn light_clip_planes(light: &ConeLight) -> [Vec4; 6] {
    calc_cone_frustum(light.position(), light.direction(), light.tan_phi(), light.length())
}

/// Nearest of three points along the view axis and the depth range they span.
///
/// `af`, `bf`, `cf` are the view depths of `a`, `b`, `c`. Returns
/// `(nearest point, min depth, max depth)`.
pub fn detect_min_max(a: Vec3, b: Vec3, c: Vec3, af: f32, bf: f32, cf: f32) -> (Vec3, f32, f32) {
    if af <= bf {
        if bf <= cf {
            (a, af, cf)
        } else if af <= cf {
            (a, af, bf)
        } else {
            (c, cf, bf)
        }
    } else if bf >= cf {
        (c, cf, af)
    } else {
        (b, bf, af.max(cf))
    }
}

/// View-dependent data the shaft shader needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaftExtent {
    /// World-space point of the cone closest to the camera along the view axis
    pub cone_min: Vec3,
    /// Depth range covered by the cone along the view axis
    pub cone_depth: f32,
    /// Light position in view space
    pub eye_light_pos: Vec3,
    /// Inverse of the view rotation
    pub inverse_view_rot: Mat3,
}

/// Depth extent of the light cone as seen from the camera with `view`.
///
/// The cone is represented by its apex and the two base rim points lying in
/// the plane that contains the axis and faces the camera.
pub fn shaft_extent(light: &ConeLight, view: &Mat4) -> ShaftExtent {
    let dir = light.direction();
    let a = light.position();
    let s = a + dir * light.length();

    let inverse_view = view.inverse();
    let cam = inverse_view.transform_point3(Vec3::ZERO);

    let v = (s - cam).normalize();
    let side = if dir.dot(v).abs() < 0.999 { dir } else { Vec3::X };
    let p = side.cross(v);

    let across = p.cross(dir).normalize();
    let r = light.base_radius();

    let b = s - across * r;
    let c = s + across * r;

    let view_z = -inverse_view.z_axis.truncate();
    let af = view_z.dot(a - cam);
    let bf = view_z.dot(b - cam);
    let cf = view_z.dot(c - cam);
    let (cone_min, min_f, max_f) = detect_min_max(a, b, c, af, bf, cf);

    let eye = *view * light.position_h();

    ShaftExtent {
        cone_min,
        cone_depth: (max_f - min_f).abs(),
        eye_light_pos: eye.truncate() / eye.w,
        inverse_view_rot: Mat3::from_mat4(*view).inverse(),
    }
}

#[cfg(test)]
#[path = "cone_frustum_tests.rs"]
mod tests;
