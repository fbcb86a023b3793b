/// Mock graphics device for unit tests (no GPU required)
///
/// Every call is recorded as a readable command string so that tests can
/// assert the exact order of passes. Uniform uploads are also stored by
/// (program, name) so their values can be checked.

use std::collections::VecDeque;
use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferKind, IndexType, VertexLayout,
    Texture, TextureDesc, TextureFormat, TextureInfo, Renderbuffer,
    Framebuffer, ColorAttachment,
    Program, ProgramDesc, UniformValue,
    ClearFlags, Capability, Face, BlendFactor, PolygonMode, Primitive, Viewport,
};

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub id: u32,
    pub kind: BufferKind,
    pub data: Vec<u8>,
}

impl Buffer for MockBuffer {
    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug)]
pub struct MockVertexArray {
    pub id: u32,
    pub layout: VertexLayout,
    pub indexed: bool,
}

#[derive(Debug)]
pub struct MockTexture {
    pub id: u32,
    pub label: String,
    pub info: TextureInfo,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

#[derive(Debug)]
pub struct MockRenderbuffer {
    pub id: u32,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
}

impl Renderbuffer for MockRenderbuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct MockFramebuffer {
    pub id: u32,
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct MockProgram {
    pub id: u32,
    pub name: String,
    pub defines: String,
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock device
// ============================================================================

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Every call in order
    pub commands: Vec<String>,
    /// Last value uploaded per (program name, uniform name)
    pub uniforms: FxHashMap<(String, String), UniformValue>,
    /// Programs created so far, by name
    pub programs: Vec<String>,
    /// Framebuffer labels that report an incomplete status
    pub incomplete_framebuffers: Vec<String>,
    /// Program names that fail to link
    pub failing_programs: Vec<String>,
    /// Errors returned by `poll_error`, oldest first
    pub pending_errors: VecDeque<String>,
    next_id: u32,
    bound_program: Option<String>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Commands recorded since the last call, and clear them
    pub fn take_commands(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }

    /// Value last uploaded to `name` on `program`
    pub fn uniform(&self, program: &str, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(&(program.to_string(), name.to_string()))
    }

    /// Name of the currently bound program
    pub fn bound_program(&self) -> Option<&str> {
        self.bound_program.as_deref()
    }
}

fn clear_flags_name(flags: ClearFlags) -> String {
    let mut names = Vec::new();
    if flags.contains(ClearFlags::COLOR) {
        names.push("COLOR");
    }
    if flags.contains(ClearFlags::DEPTH) {
        names.push("DEPTH");
    }
    if flags.contains(ClearFlags::STENCIL) {
        names.push("STENCIL");
    }
    names.join(" | ")
}

impl GraphicsDevice for MockGraphicsDevice {
    type Buffer = MockBuffer;
    type VertexArray = MockVertexArray;
    type Texture = MockTexture;
    type Renderbuffer = MockRenderbuffer;
    type Framebuffer = MockFramebuffer;
    type Program = MockProgram;

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<MockBuffer> {
        self.commands.push(format!("create_buffer({:?}, {})", kind, data.len()));
        Ok(MockBuffer { id: self.next_id(), kind, data: data.to_vec() })
    }

    fn create_vertex_array(
        &mut self,
        vertices: &MockBuffer,
        indices: Option<&MockBuffer>,
        layout: &VertexLayout,
    ) -> Result<MockVertexArray> {
        if vertices.kind != BufferKind::Vertex || indices.is_some_and(|b| b.kind != BufferKind::Index) {
            return Err(Error::InvalidResource("Buffer bound with the wrong kind".to_string()));
        }
        let id = self.next_id();
        self.commands.push(format!("create_vertex_array({})", id));
        Ok(MockVertexArray { id, layout: layout.clone(), indexed: indices.is_some() })
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<MockTexture> {
        desc.validate()?;
        self.commands.push(format!("create_texture({}, {}x{})", desc.label, desc.width, desc.height));
        Ok(MockTexture { id: self.next_id(), label: desc.label.clone(), info: desc.info() })
    }

    fn create_renderbuffer(&mut self, format: TextureFormat, width: u32, height: u32) -> Result<MockRenderbuffer> {
        self.commands.push(format!("create_renderbuffer({:?}, {}x{})", format, width, height));
        Ok(MockRenderbuffer { id: self.next_id(), format, width, height })
    }

    fn create_framebuffer(
        &mut self,
        label: &str,
        color: ColorAttachment<'_, MockTexture, MockRenderbuffer>,
        depth_stencil: Option<&MockTexture>,
    ) -> Result<MockFramebuffer> {
        if self.incomplete_framebuffers.iter().any(|l| l == label) {
            return Err(Error::FramebufferIncomplete("GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT".to_string()));
        }
        let (width, height) = match color {
            ColorAttachment::Texture(t) => (t.info.width, t.info.height),
            ColorAttachment::Renderbuffer(r) => (r.width, r.height),
        };
        if let Some(depth) = depth_stencil {
            if depth.info.width != width || depth.info.height != height {
                return Err(Error::FramebufferIncomplete("GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS".to_string()));
            }
            if !depth.info.format.is_depth() {
                return Err(Error::FramebufferIncomplete("GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT".to_string()));
            }
        }
        self.commands.push(format!("create_framebuffer({}, {}x{})", label, width, height));
        Ok(MockFramebuffer { id: self.next_id(), label: label.to_string(), width, height })
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<MockProgram> {
        desc.validate()?;
        if self.failing_programs.iter().any(|n| n == &desc.name) {
            return Err(Error::ProgramLink(format!("{}: mock link failure", desc.name)));
        }
        self.commands.push(format!("create_program({})", desc.name));
        self.programs.push(desc.name.clone());
        Ok(MockProgram { id: self.next_id(), name: desc.name.clone(), defines: desc.defines.clone() })
    }

    fn bind_program(&mut self, program: Option<&MockProgram>) {
        let name = program.map(|p| p.name.clone());
        self.commands.push(format!("bind_program({})", name.as_deref().unwrap_or("none")));
        self.bound_program = name;
    }

    fn set_uniform(&mut self, program: &MockProgram, name: &str, value: UniformValue) {
        self.commands.push(format!("set_uniform({}, {})", program.name, name));
        self.uniforms.insert((program.name.clone(), name.to_string()), value);
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<&MockFramebuffer>) {
        let label = framebuffer.map(|f| f.label.as_str()).unwrap_or("default");
        self.commands.push(format!("bind_framebuffer({})", label));
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&MockTexture>) {
        let label = texture.map(|t| t.label.as_str()).unwrap_or("none");
        self.commands.push(format!("bind_texture({}, {})", unit, label));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<&MockVertexArray>) {
        match vertex_array {
            Some(vao) => self.commands.push(format!("bind_vertex_array({})", vao.id)),
            None => self.commands.push("bind_vertex_array(none)".to_string()),
        }
    }

    fn set_draw_buffers_enabled(&mut self, enabled: bool) {
        self.commands.push(format!("draw_buffers({})", enabled));
    }

    fn viewport(&mut self, viewport: Viewport) {
        self.commands.push(format!(
            "viewport({}, {}, {}, {})",
            viewport.x, viewport.y, viewport.width, viewport.height
        ));
    }

    fn clear_color(&mut self, color: Vec4) {
        self.commands.push(format!("clear_color({}, {}, {}, {})", color.x, color.y, color.z, color.w));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.commands.push(format!("clear({})", clear_flags_name(flags)));
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let verb = if enabled { "enable" } else { "disable" };
        self.commands.push(format!("{}({:?})", verb, capability));
    }

    fn cull_face(&mut self, face: Face) {
        self.commands.push(format!("cull_face({:?})", face));
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.commands.push(format!("blend_func({:?}, {:?})", src, dst));
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        self.commands.push(format!("polygon_mode({:?})", mode));
    }

    fn color_mask(&mut self, enabled: bool) {
        self.commands.push(format!("color_mask({})", enabled));
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) {
        self.commands.push(format!("draw_arrays({:?}, {}, {})", primitive, first, count));
    }

    fn draw_elements(&mut self, primitive: Primitive, count: u32, index_type: IndexType) {
        self.commands.push(format!("draw_elements({:?}, {}, {:?})", primitive, count, index_type));
    }

    fn flush(&mut self) {
        self.commands.push("flush".to_string());
    }

    fn poll_error(&mut self) -> Option<String> {
        self.pending_errors.pop_front()
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
