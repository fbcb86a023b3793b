/*!
# Billiard Engine

Core of the billiard light-shaft demo: a ball on a pool table lit by a
spotlight, with variance shadow mapping and a volumetric light cone.

This crate is backend-agnostic. Everything that touches the GPU goes through
the [`GraphicsDevice`](billiard::render::GraphicsDevice) trait, implemented by
the OpenGL backend crate and by a command-recording mock in unit tests.

## Architecture

- **Frustum / Plane**: camera matrices with memoized planes and corners
- **ConeLight**: spotlight with a finite cone, cone clip planes and shaft extent
- **Scene objects**: table, ball, light shaft slices, dust, blur quad
- **Game**: owns the scene and the offscreen targets, runs the frame passes
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod assets;
pub mod config;
pub mod camera;
pub mod graphics_device;
pub mod light;
pub mod scene;
pub mod target;
pub mod game;

// Main billiard namespace module
pub mod billiard {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging, program lifecycle)
    pub use crate::engine::Engine;

    // Orchestrator and its configuration
    pub use crate::game::Game;
    pub use crate::config::{GameConfig, BALL_DIAMETER};

    // Assets
    pub use crate::assets::{AssetSource, FileAssets, ImageData};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Math sub-module: camera and light geometry
    pub mod math {
        pub use crate::camera::*;
        pub use crate::light::*;
    }

    // Render sub-module: the device trait and everything it takes
    pub mod render {
        pub use crate::graphics_device::*;
    }
}

// Re-export math library at crate root
pub use glam;
