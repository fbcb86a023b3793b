/// Unit tests for MockGraphicsDevice and associated mock types.

use glam::Vec4;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::*;
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferKind, IndexType, VertexLayout,
    Texture, TextureDesc, TextureFormat, TextureTarget, Framebuffer, ColorAttachment,
    Program, ProgramDesc, ShaderSource, ShaderStage, UniformValue,
    ClearFlags, Capability, Primitive, Viewport,
};

fn program_desc(name: &str) -> ProgramDesc {
    ProgramDesc {
        name: name.to_string(),
        defines: "#define DEPTH_PASS\n".to_string(),
        stages: vec![
            ShaderSource { stage: ShaderStage::Vertex, source: String::new() },
            ShaderSource { stage: ShaderStage::Fragment, source: String::new() },
        ],
    }
}

// ============================================================================
// Resources
// ============================================================================

#[test]
fn test_mock_buffer_creation() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(BufferKind::Vertex, &[0u8; 64]).unwrap();
    assert_eq!(buffer.kind(), BufferKind::Vertex);
    assert_eq!(buffer.size(), 64);
    assert_eq!(device.commands, vec!["create_buffer(Vertex, 64)"]);
}

#[test]
fn test_mock_vertex_array_rejects_wrong_kind() {
    let mut device = MockGraphicsDevice::new();
    let vertices = device.create_buffer(BufferKind::Vertex, &[0u8; 12]).unwrap();
    let indices = device.create_buffer(BufferKind::Index, &[0u8; 6]).unwrap();
    let layout = VertexLayout::interleaved(&[(0, 3)]);

    let vao = device.create_vertex_array(&vertices, Some(&indices), &layout).unwrap();
    assert!(vao.indexed);

    assert!(device.create_vertex_array(&indices, None, &layout).is_err());
    assert!(device.create_vertex_array(&vertices, Some(&vertices), &layout).is_err());
}

#[test]
fn test_mock_texture_validates_desc() {
    let mut device = MockGraphicsDevice::new();
    let tex = device
        .create_texture(&TextureDesc::color_map("moments", TextureFormat::Rgba32F, 32, 16))
        .unwrap();
    assert_eq!(tex.info().width, 32);
    assert_eq!(tex.info().height, 16);
    assert_eq!(tex.label, "moments");

    let bad = TextureDesc::color_map("bad", TextureFormat::Rgba32F, 0, 0);
    assert!(matches!(device.create_texture(&bad), Err(Error::InvalidResource(_))));
}

#[test]
fn test_mock_framebuffer_checks_dimensions() {
    let mut device = MockGraphicsDevice::new();
    let color = device
        .create_texture(&TextureDesc::color_map("c", TextureFormat::Rgba32F, 8, 8))
        .unwrap();
    let depth = device
        .create_texture(&TextureDesc::depth_map("d", TextureTarget::Texture2D, 8, 8))
        .unwrap();
    let small = device
        .create_texture(&TextureDesc::depth_map("s", TextureTarget::Texture2D, 4, 4))
        .unwrap();

    let fb = device
        .create_framebuffer("ok", ColorAttachment::Texture(&color), Some(&depth))
        .unwrap();
    assert_eq!((fb.width(), fb.height()), (8, 8));

    let err = device
        .create_framebuffer("bad", ColorAttachment::Texture(&color), Some(&small))
        .unwrap_err();
    assert!(matches!(err, Error::FramebufferIncomplete(_)));
}

#[test]
fn test_mock_framebuffer_forced_failure() {
    let mut device = MockGraphicsDevice::new();
    device.incomplete_framebuffers.push("scene_depth".to_string());
    let rb = device.create_renderbuffer(TextureFormat::Rgba8, 4, 4).unwrap();
    let result = device.create_framebuffer("scene_depth", ColorAttachment::Renderbuffer(&rb), None);
    assert!(matches!(result, Err(Error::FramebufferIncomplete(_))));
}

#[test]
fn test_mock_program_creation_and_failure() {
    let mut device = MockGraphicsDevice::new();
    let program = device.create_program(&program_desc("table_depth")).unwrap();
    assert_eq!(program.name(), "table_depth");
    assert_eq!(program.defines, "#define DEPTH_PASS\n");
    assert_eq!(device.programs, vec!["table_depth"]);

    device.failing_programs.push("shaft".to_string());
    assert!(matches!(device.create_program(&program_desc("shaft")), Err(Error::ProgramLink(_))));
}

// ============================================================================
// Command recording
// ============================================================================

#[test]
fn test_mock_records_state_commands() {
    let mut device = MockGraphicsDevice::new();
    device.viewport(Viewport::sized(1024, 1024));
    device.clear_color(Vec4::ONE);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL);
    device.set_capability(Capability::ClipDistance(3), true);
    device.set_capability(Capability::Blend, false);
    device.draw_arrays(Primitive::TriangleFan, 0, 4);
    device.draw_elements(Primitive::Patches(3), 960, IndexType::U16);
    device.flush();

    assert_eq!(
        device.take_commands(),
        vec![
            "viewport(0, 0, 1024, 1024)",
            "clear_color(1, 1, 1, 1)",
            "clear(COLOR | DEPTH | STENCIL)",
            "enable(ClipDistance(3))",
            "disable(Blend)",
            "draw_arrays(TriangleFan, 0, 4)",
            "draw_elements(Patches(3), 960, U16)",
            "flush",
        ]
    );
    assert!(device.commands.is_empty());
}

#[test]
fn test_mock_stores_uniforms_and_bound_program() {
    let mut device = MockGraphicsDevice::new();
    let program = device.create_program(&program_desc("blur_v")).unwrap();

    device.bind_program(Some(&program));
    assert_eq!(device.bound_program(), Some("blur_v"));
    device.set_uniform(&program, "u_Texture", UniformValue::Int(0));
    device.bind_program(None);
    assert_eq!(device.bound_program(), None);

    assert_eq!(device.uniform("blur_v", "u_Texture"), Some(&UniformValue::Int(0)));
    assert_eq!(device.uniform("blur_v", "u_Missing"), None);
}

#[test]
fn test_mock_poll_error_fifo() {
    let mut device = MockGraphicsDevice::new();
    device.pending_errors.push_back("GL_INVALID_ENUM".to_string());
    device.pending_errors.push_back("GL_INVALID_VALUE".to_string());
    assert_eq!(device.poll_error().as_deref(), Some("GL_INVALID_ENUM"));
    assert_eq!(device.poll_error().as_deref(), Some("GL_INVALID_VALUE"));
    assert_eq!(device.poll_error(), None);
}
