/// Game: per-frame render orchestration and input handling.
///
/// A frame runs strictly in this order:
///
/// 1. light clip planes uploaded to the shaft and dust programs
/// 2. scene depth pass (table + ball, depth only)
/// 3. shadow pass (ball moments, vertical then horizontal blur)
/// 4. main pass (lit table, lit ball)
/// 5. light shaft pass (dust, then additive shaft slices)
///
/// Construction and resize fail on incomplete framebuffers or shader
/// errors. Errors reported by the device during a frame are only logged.

use glam::{Vec2, Vec4};
use crate::assets::AssetSource;
use crate::camera::{Frustum, OrbitCamera};
use crate::config::GameConfig;
use crate::error::Result;
use crate::graphics_device::{
    BlendFactor, Capability, ClearFlags, Face, GraphicsDevice, Viewport,
};
use crate::light::ConeLight;
use crate::scene::{Ball, BlurAxis, BlurQuad, Dust, LightShaft, Table};
use crate::target::{SceneDepthTarget, ShadowTarget};

/// Number of light clip planes (gl_ClipDistance[0..6])
const CLIP_PLANE_COUNT: u32 = 6;

pub struct Game<D: GraphicsDevice> {
    table: Table<D>,
    ball: Ball<D>,
    shaft: LightShaft<D>,
    dust: Dust<D>,
    blur: BlurQuad<D>,

    shadow: ShadowTarget<D>,
    shadow_blur: ShadowTarget<D>,
    scene_depth: SceneDepthTarget<D>,

    frustum: Frustum,
    camera: OrbitCamera,
    light: ConeLight,
    config: GameConfig,
    width: u32,
    height: u32,

    device: D,
}

impl<D: GraphicsDevice> Game<D> {
    /// Load every scene object and create the offscreen targets for a
    /// `width` x `height` window
    pub fn new(mut device: D, assets: &dyn AssetSource, config: GameConfig, width: u32, height: u32) -> Result<Self> {
        let mut light = ConeLight::new();
        light.set_position(config.light_position);
        light.set_direction(config.light_direction);
        light.set_length(config.light_length);
        light.set_spot_cutoff(config.light_cutoff_deg);

        let table = Table::new(&mut device, assets)?;
        let ball = Ball::new(&mut device, assets)?;
        let shaft = LightShaft::new(&mut device, assets, config.shaft_planes)?;
        let dust = Dust::new(&mut device, assets, &light, config.dust_particles, config.dust_seed)?;
        let blur = BlurQuad::new(&mut device, assets, config.shadow_map_size)?;

        let shadow = ShadowTarget::new(&mut device, "shadow", config.shadow_map_size)?;
        let shadow_blur = ShadowTarget::new(&mut device, "shadow_blur", config.shadow_map_size)?;
        let scene_depth = SceneDepthTarget::new(&mut device, "scene", width, height)?;

        let camera = OrbitCamera::new(&config);
        let mut frustum = Frustum::new();
        camera.apply(&mut frustum);

        let mut game = Self {
            table,
            ball,
            shaft,
            dust,
            blur,
            shadow,
            shadow_blur,
            scene_depth,
            frustum,
            camera,
            light,
            config,
            width,
            height,
            device,
        };
        game.update_projection();

        game.device.set_capability(Capability::DepthTest, true);
        game.device.set_capability(Capability::CullFace, true);
        game.device.viewport(Viewport::sized(width, height));
        game.device.clear_color(Vec4::new(0.0, 0.0, 0.0, 1.0));
        game.check_errors("initialization");

        crate::engine_info!(
            "billiard::Game",
            "Scene ready: {}x{} window, {}x{} shadow map, {} shaft slices, {} dust particles",
            width,
            height,
            game.config.shadow_map_size,
            game.config.shadow_map_size,
            game.config.shaft_planes,
            game.config.dust_particles
        );
        Ok(game)
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn light(&self) -> &ConeLight {
        &self.light
    }

    pub fn ball(&self) -> &Ball<D> {
        &self.ball
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current window size
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // ===== FRAME =====

    /// Render one frame; `time` is the elapsed time in seconds
    pub fn render(&mut self, time: f32) {
        self.update();
        self.ball.update(&mut self.device, &self.frustum, &self.light);
        self.check_errors("update");

        self.render_scene_depth();
        self.check_errors("scene depth pass");

        self.render_shadow_map();
        self.check_errors("shadow pass");

        self.device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
        self.table.render(&mut self.device, &self.frustum, &self.light, self.shadow.moments());
        self.ball.render(&mut self.device);
        self.check_errors("main pass");

        self.render_light_shaft(time);
        self.check_errors("light shaft pass");
    }

    /// Upload the light cone clip planes
    fn update(&mut self) {
        self.shaft.set_clip_planes(&mut self.device, &self.light);
        self.dust.set_light(&mut self.device, &self.light);
    }

    fn render_scene_depth(&mut self) {
        let device = &mut self.device;
        device.bind_framebuffer(Some(self.scene_depth.framebuffer()));
        device.set_draw_buffers_enabled(false);
        device.clear(ClearFlags::DEPTH | ClearFlags::STENCIL);
        device.color_mask(false);

        self.table.render_depth(device, &self.frustum);
        self.ball.render_depth(device);
        device.flush();

        device.bind_vertex_array(None);
        device.bind_framebuffer(None);
        device.set_draw_buffers_enabled(true);
        device.color_mask(true);
    }

    fn render_shadow_map(&mut self) {
        let device = &mut self.device;
        let size = self.shadow.size();

        device.bind_framebuffer(Some(self.shadow.framebuffer()));
        device.viewport(Viewport::sized(size, size));
        device.clear_color(Vec4::ONE);
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL);
        self.ball.render_shadow(device);
        device.flush();

        self.blur.bind(device);
        device.cull_face(Face::Back);

        device.bind_framebuffer(Some(self.shadow_blur.framebuffer()));
        device.clear(ClearFlags::DEPTH | ClearFlags::STENCIL);
        self.blur.draw(device, BlurAxis::Vertical, self.shadow.moments());

        device.bind_framebuffer(Some(self.shadow.framebuffer()));
        device.clear(ClearFlags::DEPTH | ClearFlags::STENCIL);
        self.blur.draw(device, BlurAxis::Horizontal, self.shadow_blur.moments());

        device.bind_vertex_array(None);
        device.bind_program(None);
        device.bind_framebuffer(None);
        device.viewport(Viewport::sized(self.width, self.height));
        device.clear_color(Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    fn render_light_shaft(&mut self, time: f32) {
        let device = &mut self.device;
        device.set_capability(Capability::Blend, true);

        device.blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        self.dust.render(device, &self.frustum, time);

        device.blend_func(BlendFactor::SrcAlpha, BlendFactor::One);
        device.set_capability(Capability::CullFace, false);
        for i in 0..CLIP_PLANE_COUNT {
            device.set_capability(Capability::ClipDistance(i), true);
        }

        self.shaft.render(
            device,
            &self.frustum,
            &self.light,
            self.shadow.moments(),
            self.scene_depth.depth(),
        );

        for i in 0..CLIP_PLANE_COUNT {
            device.set_capability(Capability::ClipDistance(i), false);
        }
        device.set_capability(Capability::Blend, false);
    }

    fn check_errors(&mut self, stage: &str) {
        while let Some(error) = self.device.poll_error() {
            crate::engine_error!("billiard::Game", "GL error during {}: {}", stage, error);
        }
    }

    // ===== WINDOW =====

    /// Follow a window resize: viewport, projection aspect and the
    /// window-sized scene depth target. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            crate::engine_debug!("billiard::Game", "Ignoring resize to {}x{}", width, height);
            return Ok(());
        }

        self.device.viewport(Viewport::sized(width, height));
        self.width = width;
        self.height = height;
        self.update_projection();

        self.scene_depth = SceneDepthTarget::new(&mut self.device, "scene", width, height)?;
        crate::engine_debug!("billiard::Game", "Resized to {}x{}", width, height);
        Ok(())
    }

    fn update_projection(&mut self) {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        self.frustum
            .proj_set_perspective(self.config.fovy_deg, aspect, self.config.z_near, self.config.z_far);
    }

    // ===== INPUT =====

    /// Any key other than Escape: wireframe while held
    pub fn key_action(&mut self, pressed: bool) {
        self.ball.set_line_fill(pressed);
    }

    pub fn mouse_down(&mut self) {
        self.camera.mouse_down();
    }

    pub fn mouse_up(&mut self) {
        self.camera.mouse_up();
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        if self.camera.cursor_moved(Vec2::new(x, y)) {
            self.camera.apply(&mut self.frustum);
        }
    }

    /// Wheel offset in lines
    pub fn mouse_scrolled(&mut self, y: f32) {
        self.camera.scrolled(y);
        self.camera.apply(&mut self.frustum);
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
