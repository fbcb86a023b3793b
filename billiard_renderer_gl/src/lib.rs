/*!
# Billiard Engine - OpenGL Renderer Backend

OpenGL 4.1 core implementation of the billiard engine's `GraphicsDevice`
trait.

This crate provides the window and context setup (winit + glutin), GL bindings
through `glow`, RAII wrappers for every GL object, and error/debug reporting
routed through the engine logger.

# Example

```no_run
use billiard_renderer_gl::{GlGraphicsDevice, GlWindow, RendererConfig};
# fn create(event_loop: &winit::event_loop::ActiveEventLoop) -> billiard_engine::billiard::Result<()> {
let window = GlWindow::new(event_loop, &RendererConfig::default())?;
let device = GlGraphicsDevice::new(window.gl());
# Ok(())
# }
```
*/

mod config;
mod gl_buffer;
mod gl_vertex_array;
mod gl_texture;
mod gl_framebuffer;
mod gl_program;
mod gl_device;
mod gl_window;
mod gl_debug;

pub use config::RendererConfig;
pub use gl_buffer::GlBuffer;
pub use gl_vertex_array::GlVertexArray;
pub use gl_texture::{GlRenderbuffer, GlTexture};
pub use gl_framebuffer::GlFramebuffer;
pub use gl_program::GlProgram;
pub use gl_device::GlGraphicsDevice;
pub use gl_window::GlWindow;

// Re-export debug utilities
pub use gl_debug::{get_gl_stats, print_gl_stats_report, reset_gl_stats, GlStats};
