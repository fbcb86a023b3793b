/// GlWindow - winit window with a current glutin OpenGL context
///
/// Creation follows the glutin-winit flow: pick a config together with the
/// window, create a core-profile context, a window surface, make the
/// context current and load the GL entry points into `glow`.

use billiard_engine::billiard::{Error, Result};
use billiard_engine::{engine_info, engine_warn};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::raw_window_handle::HasWindowHandle;
use winit::window::Window;

use crate::config::RendererConfig;

/// Config with the fewest samples: the frame renders through offscreen
/// targets that are not multisampled
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| if config.num_samples() < best.num_samples() { config } else { best })
        .expect("glutin only calls the config picker with at least one config")
}

fn init_error(what: &str, e: impl std::fmt::Display) -> Error {
    Error::InitializationFailed(format!("{}: {}", what, e))
}

/// Surface size, with zero dimensions (minimized) raised to 1
fn surface_size(width: u32, height: u32) -> (NonZeroU32, NonZeroU32) {
    (
        NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
    )
}

pub struct GlWindow {
    // surface and context go before the window they render into
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Rc<glow::Context>,
    window: Window,
}

impl GlWindow {
    /// Create the window and its context; call from `resumed`
    pub fn new(event_loop: &ActiveEventLoop, config: &RendererConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let template = ConfigTemplateBuilder::new().with_depth_size(24).with_stencil_size(8);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| init_error("No suitable GL configuration", e))?;
        let window = window.ok_or_else(|| Error::InitializationFailed("Window was not created".to_string()))?;

        let raw_window_handle = window
            .window_handle()
            .map_err(|e| init_error("No window handle", e))?
            .as_raw();

        let gl_display = gl_config.display();
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .with_debug(config.debug)
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| init_error(&format!("Cannot create an OpenGL {}.{} core context", major, minor), e))?;

        let size = window.inner_size();
        let (width, height) = surface_size(size.width, size.height);
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| init_error("Cannot create the window surface", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| init_error("Cannot make the context current", e))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            engine_warn!("billiard::gl", "Cannot set swap interval: {}", e);
        }

        #[allow(unused_mut)]
        let mut gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                CString::new(symbol)
                    .map(|symbol| gl_display.get_proc_address(&symbol))
                    .unwrap_or(std::ptr::null())
            })
        };

        #[cfg(feature = "gl-debug-output")]
        if config.debug {
            crate::gl_debug::install_debug_output(&mut gl);
        }

        engine_info!(
            "billiard::gl",
            "Window '{}' created: {}x{} physical, {} sample(s)",
            config.title,
            size.width,
            size.height,
            gl_config.num_samples()
        );

        Ok(Self {
            surface,
            context,
            gl: Rc::new(gl),
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Shared handle for the graphics device
    pub fn gl(&self) -> Rc<glow::Context> {
        self.gl.clone()
    }

    /// Follow a window resize; zero sizes are ignored
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) = surface_size(width, height);
        self.surface.resize(&self.context, width, height);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| Error::BackendError(format!("Buffer swap failed: {}", e)))
    }
}
