//! Billiard light-shaft demo
//!
//! Opens a 640x480 OpenGL 4.1 window and renders the billiard scene until
//! the window is closed or Escape is pressed.
//!
//! Controls: left-drag orbits the camera, the wheel zooms, any other key
//! shows the ball wireframe while held.

use billiard_engine::billiard::{Engine, Error, FileAssets, Game, GameConfig, Result};
use billiard_engine::{engine_debug, engine_error, engine_info};
use billiard_renderer_gl::{print_gl_stats_report, GlGraphicsDevice, GlWindow, RendererConfig};
use std::process::ExitCode;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

/// Pixel scroll deltas (touchpads) are converted to wheel lines
const PIXELS_PER_LINE: f64 = 20.0;

/// Everything that needs the GL context
struct Running {
    // the game holds GL objects and must drop before the context
    game: Game<GlGraphicsDevice>,
    window: GlWindow,
}

struct App {
    renderer_config: RendererConfig,
    game_config: GameConfig,
    assets: FileAssets,
    start: Instant,
    running: Option<Running>,
    /// First fatal error; ends the event loop
    error: Option<Error>,
}

impl App {
    fn new(assets: FileAssets) -> Self {
        Self {
            renderer_config: RendererConfig::default(),
            game_config: GameConfig::default(),
            assets,
            start: Instant::now(),
            running: None,
            error: None,
        }
    }

    fn create(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let window = GlWindow::new(event_loop, &self.renderer_config)?;
        let size = window.window().inner_size();
        let device = GlGraphicsDevice::new(window.gl());
        let game = Game::new(device, &self.assets, self.game_config.clone(), size.width, size.height)?;
        Ok(Running { game, window })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        engine_error!("billiard::Demo", "{}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.create(event_loop) {
            Ok(running) => {
                running.window.window().request_redraw();
                self.start = Instant::now();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                running.window.resize(size.width, size.height);
                if let Err(e) = running.game.resize(size.width, size.height) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    if event.state == ElementState::Pressed {
                        event_loop.exit();
                    }
                } else {
                    running.game.key_action(event.state.is_pressed());
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => running.game.mouse_down(),
                ElementState::Released => running.game.mouse_up(),
            },

            WindowEvent::CursorMoved { position, .. } => {
                running.game.mouse_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
                };
                running.game.mouse_scrolled(lines);
            }

            WindowEvent::RedrawRequested => {
                running.game.render(self.start.elapsed().as_secs_f32());
                match running.window.swap_buffers() {
                    Ok(()) => running.window.window().request_redraw(),
                    Err(e) => self.fail(event_loop, e),
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // release GL objects while the context is still alive
        if self.running.take().is_some() {
            engine_debug!("billiard::Demo", "Scene released");
        }
    }
}

fn run() -> Result<()> {
    let assets = FileAssets::discover()?;

    let event_loop = EventLoop::new()
        .map_err(|e| Error::InitializationFailed(format!("Cannot create the event loop: {}", e)))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(assets);
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::BackendError(format!("Event loop failed: {}", e)))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let argv0 = std::env::args().next().unwrap_or_default();
    if let Err(e) = Engine::initialize(&argv0) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = run();
    if cfg!(debug_assertions) {
        print_gl_stats_report();
    }

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            engine_error!("billiard::Demo", "Fatal: {}", e);
            ExitCode::FAILURE
        }
    };
    engine_info!("billiard::Demo", "Exiting");
    Engine::shutdown();
    code
}
