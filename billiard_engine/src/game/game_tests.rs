/// Tests for Game
///
/// These tests run the full pass sequence against MockGraphicsDevice and
/// assert the recorded command order, resize handling and input routing.

use glam::Vec3;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::UniformValue;
use crate::scene::test_assets::MemoryAssets;
use super::*;

fn new_game() -> Game<MockGraphicsDevice> {
    Game::new(MockGraphicsDevice::new(), &MemoryAssets::new(), GameConfig::default(), 640, 480).unwrap()
}

fn position(commands: &[String], command: &str) -> usize {
    commands
        .iter()
        .position(|c| c == command)
        .unwrap_or_else(|| panic!("'{}' not recorded", command))
}

fn frame_commands(game: &mut Game<MockGraphicsDevice>) -> Vec<String> {
    game.device_mut().take_commands();
    game.render(0.0);
    game.device_mut().take_commands()
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_new_builds_all_programs() {
    let game = new_game();
    assert_eq!(
        game.device().programs,
        vec![
            "table", "table_depth",
            "ball", "ball_shadow", "ball_depth",
            "shaft", "particles",
            "blur_vertical", "blur_horizontal",
        ]
    );
}

#[test]
fn test_new_creates_targets() {
    let game = new_game();
    let cmds = &game.device().commands;
    assert!(cmds.contains(&"create_framebuffer(shadow, 1024x1024)".to_string()));
    assert!(cmds.contains(&"create_framebuffer(shadow_blur, 1024x1024)".to_string()));
    assert!(cmds.contains(&"create_framebuffer(scene, 640x480)".to_string()));
    assert!(cmds.contains(&"enable(DepthTest)".to_string()));
    assert!(cmds.contains(&"enable(CullFace)".to_string()));
}

#[test]
fn test_new_configures_light_and_camera() {
    let game = new_game();
    assert_eq!(game.light().position(), Vec3::new(0.0, 2.0, 2.0));
    assert!((game.light().tan_phi() - 1.0).abs() < 1e-6);
    assert_eq!(game.camera().distance(), -2.5);
    assert_eq!(game.frustum().near(), 0.1);
    assert_eq!(game.frustum().far(), 20.0);
    assert_eq!(game.size(), (640, 480));
}

#[test]
fn test_new_fails_on_incomplete_framebuffer() {
    let mut device = MockGraphicsDevice::new();
    device.incomplete_framebuffers.push("shadow_blur".to_string());
    let result = Game::new(device, &MemoryAssets::new(), GameConfig::default(), 640, 480);
    assert!(matches!(result, Err(Error::FramebufferIncomplete(_))));
}

#[test]
fn test_new_fails_on_missing_shader() {
    let mut assets = MemoryAssets::new();
    assets.missing.push("shaders/blur.frag".to_string());
    let result = Game::new(MockGraphicsDevice::new(), &assets, GameConfig::default(), 640, 480);
    assert!(matches!(result, Err(Error::AssetLoad { .. })));
}

// ============================================================================
// Tests: Frame pass order
// ============================================================================

#[test]
fn test_frame_pass_order() {
    let mut game = new_game();
    let cmds = frame_commands(&mut game);

    let clip_planes = position(&cmds, "set_uniform(shaft, u_ClipPlanes)");
    let scene_depth = position(&cmds, "bind_framebuffer(scene)");
    let shadow = position(&cmds, "bind_framebuffer(shadow)");
    let blur = position(&cmds, "bind_framebuffer(shadow_blur)");
    let main = position(&cmds, "clear(COLOR | DEPTH)");
    let blend = position(&cmds, "enable(Blend)");
    let shaft = position(&cmds, "draw_elements(Triangles, 192, U16)");

    assert!(clip_planes < scene_depth);
    assert!(scene_depth < shadow);
    assert!(shadow < blur);
    assert!(blur < main);
    assert!(main < blend);
    assert!(blend < shaft);
    assert_eq!(cmds.last().unwrap(), "disable(Blend)");
}

#[test]
fn test_scene_depth_pass_disables_color() {
    let mut game = new_game();
    let cmds = frame_commands(&mut game);
    let start = position(&cmds, "bind_framebuffer(scene)");

    assert_eq!(
        &cmds[start..start + 5],
        &[
            "bind_framebuffer(scene)".to_string(),
            "draw_buffers(false)".to_string(),
            "clear(DEPTH | STENCIL)".to_string(),
            "color_mask(false)".to_string(),
            "bind_program(table_depth)".to_string(),
        ]
    );
    let end = position(&cmds, "color_mask(true)");
    assert_eq!(cmds[end - 1], "draw_buffers(true)");
    assert_eq!(cmds[end - 2], "bind_framebuffer(default)");
    assert!(cmds[start..end].contains(&"bind_program(ball_depth)".to_string()));
}

#[test]
fn test_shadow_pass_blurs_vertically_then_horizontally() {
    let mut game = new_game();
    let cmds = frame_commands(&mut game);
    let start = position(&cmds, "bind_framebuffer(shadow)");

    assert_eq!(cmds[start + 1], "viewport(0, 0, 1024, 1024)");
    assert_eq!(cmds[start + 2], "clear_color(1, 1, 1, 1)");
    assert_eq!(cmds[start + 3], "clear(COLOR | DEPTH | STENCIL)");
    assert_eq!(cmds[start + 4], "bind_program(ball_shadow)");

    let blur_v = position(&cmds, "bind_program(blur_vertical)");
    let blur_h = position(&cmds, "bind_program(blur_horizontal)");
    assert!(blur_v < blur_h);
    assert_eq!(cmds[blur_v + 1], "bind_texture(0, shadow_moments)");
    assert_eq!(cmds[blur_h + 1], "bind_texture(0, shadow_blur_moments)");
    // the horizontal blur writes back into the first target
    assert_eq!(cmds[blur_h - 2], "bind_framebuffer(shadow)");

    let restore = position(&cmds, "viewport(0, 0, 640, 480)");
    assert!(restore > blur_h);
    assert_eq!(cmds[restore + 1], "clear_color(0, 0, 0, 1)");
}

#[test]
fn test_light_shaft_pass_state() {
    let mut game = new_game();
    let cmds = frame_commands(&mut game);
    let blend = position(&cmds, "enable(Blend)");

    assert_eq!(cmds[blend + 1], "blend_func(SrcAlpha, OneMinusSrcAlpha)");
    let points = position(&cmds, "draw_arrays(Points, 0, 1024)");
    let additive = position(&cmds, "blend_func(SrcAlpha, One)");
    assert!(points < additive);
    assert_eq!(cmds[additive + 1], "disable(CullFace)");
    for i in 0..6 {
        let enable = position(&cmds, &format!("enable(ClipDistance({}))", i));
        let disable = position(&cmds, &format!("disable(ClipDistance({}))", i));
        assert!(additive < enable && enable < disable);
    }
    assert!(cmds[blend..].contains(&"bind_texture(2, scene_depth)".to_string()));
}

#[test]
fn test_frame_drains_device_errors() {
    let mut game = new_game();
    game.device_mut().pending_errors.push_back("GL_INVALID_OPERATION".to_string());
    game.device_mut().pending_errors.push_back("GL_INVALID_VALUE".to_string());
    game.render(0.0);
    assert!(game.device().pending_errors.is_empty());
}

#[test]
fn test_frame_passes_time_to_dust() {
    let mut game = new_game();
    game.render(2.5);
    assert_eq!(game.device().uniform("particles", "u_Time"), Some(&UniformValue::Float(2.5)));
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_recreates_scene_depth() {
    let mut game = new_game();
    game.device_mut().take_commands();
    game.resize(800, 600).unwrap();

    let cmds = game.device_mut().take_commands();
    assert_eq!(cmds[0], "viewport(0, 0, 800, 600)");
    assert!(cmds.contains(&"create_framebuffer(scene, 800x600)".to_string()));
    assert_eq!(game.size(), (800, 600));

    // projection aspect follows the window
    let proj = game.frustum().proj();
    assert!((proj.y_axis.y / proj.x_axis.x - 800.0 / 600.0).abs() < 1e-5);

    let frame = frame_commands(&mut game);
    assert!(frame.contains(&"viewport(0, 0, 800, 600)".to_string()));
}

#[test]
fn test_resize_to_zero_is_ignored() {
    let mut game = new_game();
    game.device_mut().take_commands();
    game.resize(0, 480).unwrap();
    assert!(game.device().commands.is_empty());
    assert_eq!(game.size(), (640, 480));
}

#[test]
fn test_resize_failure_propagates() {
    let mut game = new_game();
    game.device_mut().incomplete_framebuffers.push("scene".to_string());
    assert!(matches!(game.resize(1024, 768), Err(Error::FramebufferIncomplete(_))));
}

// ============================================================================
// Tests: Input
// ============================================================================

#[test]
fn test_key_action_toggles_wireframe() {
    let mut game = new_game();
    game.key_action(true);
    assert!(game.ball().line_fill());
    let cmds = frame_commands(&mut game);
    assert!(cmds.contains(&"polygon_mode(Line)".to_string()));

    game.key_action(false);
    assert!(!game.ball().line_fill());
}

#[test]
fn test_drag_rotates_view() {
    let mut game = new_game();
    let before = *game.frustum().view();

    game.mouse_moved(100.0, 100.0);
    assert_eq!(*game.frustum().view(), before);

    game.mouse_down();
    game.mouse_moved(120.0, 100.0);
    assert_eq!(game.camera().rotation().x, 5.0);
    assert_ne!(*game.frustum().view(), before);

    game.mouse_up();
    let after = *game.frustum().view();
    game.mouse_moved(300.0, 300.0);
    assert_eq!(*game.frustum().view(), after);
}

#[test]
fn test_scroll_zooms_and_clamps() {
    let mut game = new_game();
    game.mouse_scrolled(25.0);
    assert_eq!(game.camera().distance(), -5.0);
    for _ in 0..10 {
        game.mouse_scrolled(25.0);
    }
    assert_eq!(game.camera().distance(), -8.0);

    let eye = game.frustum().view().inverse().transform_point3(Vec3::ZERO);
    let center = Vec3::new(0.0, 0.0, crate::config::BALL_DIAMETER / 2.0);
    assert!(((eye - center).length() - 8.0).abs() < 1e-3);
}
