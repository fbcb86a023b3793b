//! Render target module
//!
//! Offscreen targets the frame is rendered through: the shadow moments
//! pair (ping-pong for the separable blur) and the window-sized scene
//! depth target.

mod render_target;

pub use render_target::{ShadowTarget, SceneDepthTarget};
