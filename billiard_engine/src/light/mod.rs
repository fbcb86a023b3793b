//! Light module: spotlight parameters and the cone geometry derived from them.

mod cone_light;
mod cone_frustum;

pub use cone_light::{
    ConeLight, LightUniforms,
    DEFAULT_SPOT_EXPONENT, DEFAULT_SPOT_CUTOFF, DEFAULT_LENGTH,
};
pub use cone_frustum::{
    calc_cone_xy, calc_plane, calc_cone_frustum, light_clip_planes,
    detect_min_max, shaft_extent, ShaftExtent,
};
