use glam::{Mat3, Mat4, Vec3, Vec4};
use super::*;

fn assert_unit_planes(frustum: &Frustum) {
    for (i, plane) in frustum.planes().iter().enumerate() {
        assert!(
            (plane.normal_length() - 1.0).abs() < 1e-5,
            "plane {} normal should be unit length, got {}",
            i,
            plane.normal_length()
        );
    }
}

fn orbit_frustum() -> Frustum {
    let mut frustum = Frustum::new();
    frustum.proj_set_perspective(45.0, 4.0 / 3.0, 0.1, 20.0);
    frustum.view_set_identity();
    frustum.view_translate(Vec3::new(0.0, 0.0, -2.5));
    frustum.view_rotate(-60.0, Vec3::X);
    frustum.view_rotate(30.0, Vec3::Z);
    frustum.view_translate_xyz(0.0, 0.0, -0.34);
    frustum
}

// ============================================================================
// Construction / mutators
// ============================================================================

#[test]
fn test_new_is_identity() {
    let frustum = Frustum::new();
    assert_eq!(*frustum.view(), Mat4::IDENTITY);
    assert_eq!(*frustum.proj(), Mat4::IDENTITY);
    assert_eq!(frustum.near(), 0.0);
    assert_eq!(frustum.far(), 0.0);
    assert_eq!(*frustum.view_proj(), Mat4::IDENTITY);
}

#[test]
fn test_perspective_stores_near_far() {
    let mut frustum = Frustum::new();
    frustum.proj_set_perspective(45.0, 1.0, 0.1, 20.0);
    assert_eq!(frustum.near(), 0.1);
    assert_eq!(frustum.far(), 20.0);
    let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 1.0, 0.1, 20.0);
    assert!(frustum.proj().abs_diff_eq(expected, 1e-6));
}

#[test]
fn test_view_operations_post_multiply() {
    let mut frustum = Frustum::new();
    frustum.view_translate(Vec3::new(0.0, 0.0, -5.0));
    frustum.view_rotate(90.0, Vec3::Z);

    let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0))
        * Mat4::from_rotation_z(90f32.to_radians());
    assert!(frustum.view().abs_diff_eq(expected, 1e-6));

    // World +X rotated to +Y, then pushed back along -Z
    let p = frustum.view().transform_point3(Vec3::X);
    assert!((p - Vec3::new(0.0, 1.0, -5.0)).length() < 1e-5);
}

#[test]
fn test_view_set_identity_resets() {
    let mut frustum = orbit_frustum();
    frustum.view_set_identity();
    assert_eq!(*frustum.view(), Mat4::IDENTITY);
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_derived_values_refresh_after_mutation() {
    let mut frustum = Frustum::new();
    frustum.proj_set_perspective(60.0, 1.0, 1.0, 10.0);
    let before_vp = *frustum.view_proj();
    let before_corner = *frustum.corner(0);
    let before_plane = *frustum.plane(PLANE_LEFT);
    let before_normal = *frustum.normal();

    frustum.view_rotate(45.0, Vec3::Y);

    assert_ne!(*frustum.view_proj(), before_vp);
    assert_ne!(*frustum.corner(0), before_corner);
    assert_ne!(*frustum.plane(PLANE_LEFT), before_plane);
    assert_ne!(*frustum.normal(), before_normal);
    assert!(frustum
        .view_proj()
        .abs_diff_eq(*frustum.proj() * *frustum.view(), 1e-6));
}

#[test]
fn test_repeated_reads_are_identical() {
    let frustum = orbit_frustum();
    let a = *frustum.inv_view_proj();
    let b = *frustum.inv_view_proj();
    assert_eq!(a, b);
    assert!(std::ptr::eq(frustum.planes(), frustum.planes()));
}

#[test]
fn test_clone_keeps_values() {
    let frustum = orbit_frustum();
    let _ = frustum.corners();
    let copy = frustum.clone();
    assert_eq!(copy.corners(), frustum.corners());
    assert_eq!(copy.planes(), frustum.planes());
}

// ============================================================================
// Normal matrix
// ============================================================================

#[test]
fn test_normal_matrix_is_inverse_transpose() {
    let frustum = orbit_frustum();
    let upper = Mat3::from_mat4(*frustum.view());
    let product = frustum.normal().transpose() * upper;
    assert!(product.abs_diff_eq(Mat3::IDENTITY, 1e-5));
}

#[test]
fn test_normal_matrix_of_rigid_view_is_rotation() {
    let frustum = orbit_frustum();
    let upper = Mat3::from_mat4(*frustum.view());
    assert!(frustum.normal().abs_diff_eq(upper, 1e-5));
}

// ============================================================================
// Planes
// ============================================================================

#[test]
fn test_planes_unit_length_after_mutations() {
    let mut frustum = Frustum::new();
    frustum.proj_set_perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
    assert_unit_planes(&frustum);

    frustum.view_rotate(30.0, Vec3::new(1.0, 1.0, 0.0));
    assert_unit_planes(&frustum);

    frustum.view_translate_xyz(3.0, -2.0, 7.0);
    assert_unit_planes(&frustum);

    assert_unit_planes(&orbit_frustum());
}

#[test]
fn test_near_far_planes_identity_view() {
    let mut frustum = Frustum::new();
    frustum.proj_set_perspective(45.0, 1.0, 0.1, 20.0);
    frustum.view_set_identity();

    let near = frustum.plane(PLANE_NEAR);
    let far = frustum.plane(PLANE_FAR);

    // Anti-parallel normals
    assert!((near.normal() + far.normal()).length() < 1e-5);
    assert!((near.normal() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

    // Together they bound z in [-20, -0.1]
    assert!(near.signed_distance(Vec3::new(0.0, 0.0, -0.1)).abs() < 1e-4);
    assert!(far.signed_distance(Vec3::new(0.0, 0.0, -20.0)).abs() < 1e-3);
    let inside = Vec3::new(0.0, 0.0, -5.0);
    assert!(near.signed_distance(inside) > 0.0);
    assert!(far.signed_distance(inside) > 0.0);
    assert!(near.signed_distance(Vec3::new(0.0, 0.0, -0.05)) < 0.0);
    assert!(far.signed_distance(Vec3::new(0.0, 0.0, -25.0)) < 0.0);
}

#[test]
fn test_side_planes_point_inward() {
    let frustum = orbit_frustum();
    // A point straight in front of the camera, half way to far
    let inv_view = frustum.view().inverse();
    let eye = inv_view.transform_point3(Vec3::ZERO);
    let forward = -frustum.z();
    let inside = eye + forward * 10.0;
    for plane in frustum.planes() {
        assert!(plane.signed_distance(inside) > 0.0);
    }
    // Behind the camera fails the near plane
    assert!(frustum.plane(PLANE_NEAR).signed_distance(eye - forward) < 0.0);
}

// ============================================================================
// Corners
// ============================================================================

#[test]
fn test_corner_round_trip() {
    let frustum = orbit_frustum();
    for i in 0..8 {
        let clip = *frustum.view_proj() * *frustum.corner(i);
        let ndc = clip / clip.w;
        let expected = Frustum::ndc_corner(i);
        assert!(
            (ndc - expected).length() < 1e-3,
            "corner {} maps to {:?}, expected {:?}",
            i,
            ndc,
            expected
        );
    }
}

#[test]
fn test_corners_lie_on_their_planes() {
    let frustum = orbit_frustum();
    // Near face corners 0..4 on the near plane, far face 4..8 on the far plane
    for i in 0..4 {
        let p = frustum.corner(i).truncate();
        assert!(frustum.plane(PLANE_NEAR).signed_distance(p).abs() < 1e-3);
    }
    for i in 4..8 {
        let p = frustum.corner(i).truncate();
        assert!(frustum.plane(PLANE_FAR).signed_distance(p).abs() < 1e-2);
    }
}

#[test]
fn test_corner_out_of_range_returns_corner_zero() {
    let frustum = orbit_frustum();
    assert_eq!(*frustum.corner(8), *frustum.corner(0));
    assert_eq!(*frustum.corner(usize::MAX), *frustum.corner(0));
    assert_eq!(Frustum::ndc_corner(42), Vec4::new(-1.0, -1.0, -1.0, 1.0));
}

#[test]
fn test_corners_have_unit_w() {
    for corner in orbit_frustum().corners() {
        assert!((corner.w - 1.0).abs() < 1e-6);
    }
}

// ============================================================================
// Axes
// ============================================================================

#[test]
fn test_axes_are_view_rows() {
    let mut frustum = Frustum::new();
    frustum.view_rotate(90.0, Vec3::Z);
    // Rows of a rotation are the world axes of the camera frame
    assert!((frustum.x() - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-5);
    assert!((frustum.y() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    assert!((frustum.z() - Vec3::Z).length() < 1e-5);
}
