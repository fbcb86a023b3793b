/// GraphicsDevice trait - the seam between scene code and the GPU backend
///
/// Resources are associated types owned by the caller and released on drop.
/// State commands mirror the immediate-mode API they are backed by: they
/// apply to whatever is currently bound and take effect in call order.

use glam::Vec4;
use crate::error::Result;
use super::{
    Buffer, BufferKind, IndexType, VertexLayout,
    Texture, TextureDesc, TextureFormat, Renderbuffer,
    Framebuffer, ColorAttachment,
    Program, ProgramDesc, UniformValue,
    ClearFlags, Capability, Face, BlendFactor, PolygonMode, Primitive, Viewport,
};

pub trait GraphicsDevice {
    type Buffer: Buffer;
    type VertexArray;
    type Texture: Texture;
    type Renderbuffer: Renderbuffer;
    type Framebuffer: Framebuffer;
    type Program: Program;

    // ===== RESOURCE CREATION =====

    /// Upload `data` into a new static buffer
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<Self::Buffer>;

    /// Record a vertex layout over a vertex buffer and an optional index buffer
    fn create_vertex_array(
        &mut self,
        vertices: &Self::Buffer,
        indices: Option<&Self::Buffer>,
        layout: &VertexLayout,
    ) -> Result<Self::VertexArray>;

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Self::Texture>;

    fn create_renderbuffer(&mut self, format: TextureFormat, width: u32, height: u32) -> Result<Self::Renderbuffer>;

    /// Attach color and depth/stencil targets; an incomplete framebuffer is an error
    fn create_framebuffer(
        &mut self,
        label: &str,
        color: ColorAttachment<'_, Self::Texture, Self::Renderbuffer>,
        depth_stencil: Option<&Self::Texture>,
    ) -> Result<Self::Framebuffer>;

    /// Compile and link every stage; compile or link failure is an error
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Self::Program>;

    // ===== PROGRAM STATE =====

    fn bind_program(&mut self, program: Option<&Self::Program>);

    /// Set a uniform on `program`. Unknown names are logged and skipped.
    fn set_uniform(&mut self, program: &Self::Program, name: &str, value: UniformValue);

    // ===== BINDINGS =====

    /// `None` binds the default (window) framebuffer
    fn bind_framebuffer(&mut self, framebuffer: Option<&Self::Framebuffer>);

    /// Bind `texture` to texture unit `unit`; `None` unbinds
    fn bind_texture(&mut self, unit: u32, texture: Option<&Self::Texture>);

    fn bind_vertex_array(&mut self, vertex_array: Option<&Self::VertexArray>);

    /// Enable/disable color draw and read buffers (NONE vs BACK on the default target)
    fn set_draw_buffers_enabled(&mut self, enabled: bool);

    // ===== FIXED FUNCTION STATE =====

    fn viewport(&mut self, viewport: Viewport);

    fn clear_color(&mut self, color: Vec4);

    fn clear(&mut self, flags: ClearFlags);

    fn set_capability(&mut self, capability: Capability, enabled: bool);

    fn cull_face(&mut self, face: Face);

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor);

    fn polygon_mode(&mut self, mode: PolygonMode);

    fn color_mask(&mut self, enabled: bool);

    // ===== DRAWING =====

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32);

    fn draw_elements(&mut self, primitive: Primitive, count: u32, index_type: IndexType);

    fn flush(&mut self);

    /// Pop one pending error, as a readable name
    fn poll_error(&mut self) -> Option<String>;
}
