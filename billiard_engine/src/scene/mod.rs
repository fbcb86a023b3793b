//! Scene objects of the billiard table
//!
//! Each object owns its GPU resources (vertex data, programs, textures) and
//! knows how to draw itself for every pass it takes part in. Objects are
//! generic over the graphics device so that tests can run them against the
//! mock device.

mod table;
mod ball;
mod icosphere;
mod light_shaft;
mod dust;
mod blur_quad;

pub use table::Table;
pub use ball::{Ball, ball_model_matrix, SUBDIVISION_LEVELS};
pub use icosphere::{icosahedron, tessellate, IcoMesh};
pub use light_shaft::{LightShaft, shaft_geometry};
pub use dust::{Dust, dust_particles, cone_basis};
pub use blur_quad::{BlurQuad, BlurAxis, blur_quad_vertices};

use glam::{Mat4, Vec4};
use crate::assets::AssetSource;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ProgramDesc, ShaderSource, ShaderStage, TextureDesc, TextureWrap,
};

/// Maps clip space [-1, 1] to texture space [0, 1]
pub const BIAS_MATRIX: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.5, 0.5, 0.5, 1.0),
);

/// Read `shaders/<file>` for every file and build one program.
///
/// The stage of each file comes from its extension.
pub fn load_program<D: GraphicsDevice>(
    device: &mut D,
    assets: &dyn AssetSource,
    name: &str,
    defines: &str,
    files: &[&str],
) -> Result<D::Program> {
    let mut stages = Vec::with_capacity(files.len());
    for file in files {
        let ext = file.rsplit('.').next().unwrap_or_default();
        let stage = ShaderStage::from_extension(ext).ok_or_else(|| {
            Error::InvalidResource(format!("Shader '{}' has no known stage extension", file))
        })?;
        let source = assets.read_text(&format!("shaders/{}", file))?;
        stages.push(ShaderSource { stage, source });
    }

    crate::engine_debug!("billiard::Scene", "Building program '{}' from {:?}", name, files);
    device.create_program(&ProgramDesc {
        name: name.to_string(),
        defines: defines.to_string(),
        stages,
    })
}

/// Decode `textures/<file>` and upload it as a linear-filtered RGB texture
pub fn load_texture<D: GraphicsDevice>(
    device: &mut D,
    assets: &dyn AssetSource,
    file: &str,
    wrap: TextureWrap,
) -> Result<D::Texture> {
    let image = assets.read_image_rgb(&format!("textures/{}", file))?;
    device.create_texture(&TextureDesc::rgb_image(file, image.width, image.height, image.pixels, wrap))
}

#[cfg(test)]
pub(crate) mod test_assets;

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
