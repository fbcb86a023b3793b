//! Camera module: view/projection frustum, clip planes and the orbit camera.
//!
//! The frustum is a passive data container. The game owns it and the orbit
//! camera rewrites its view matrix from mouse input.

mod plane;
mod frustum;
mod orbit_camera;

pub use plane::Plane;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use orbit_camera::OrbitCamera;
