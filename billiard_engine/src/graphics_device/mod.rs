/// Graphics device module - GPU-facing types and traits

pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod frame_buffer;
pub mod program;
pub mod state;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;
pub use frame_buffer::*;
pub use program::*;
pub use state::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
