/// GlGraphicsDevice - OpenGL 4.1 implementation of the GraphicsDevice trait
///
/// Owns nothing but the shared `glow::Context` and a little shadow state
/// (current program and framebuffer). Every resource it creates keeps its
/// own `Rc` to the context and deletes its GL name on drop, so resources
/// must be dropped before the context is destroyed.

use billiard_engine::billiard::render::{
    BlendFactor, BufferKind, Capability, ClearFlags, ColorAttachment, Face, GraphicsDevice,
    IndexType, PolygonMode, Primitive, ProgramDesc, TextureDesc, TextureFormat, UniformValue,
    VertexLayout, Viewport,
};
use billiard_engine::billiard::Result;
use billiard_engine::engine_info;
use billiard_engine::glam::Vec4;
use glow::HasContext;
use std::rc::Rc;

use crate::gl_buffer::GlBuffer;
use crate::gl_debug;
use crate::gl_framebuffer::GlFramebuffer;
use crate::gl_program::GlProgram;
use crate::gl_texture::{GlRenderbuffer, GlTexture};
use crate::gl_vertex_array::GlVertexArray;

// ===== ENUM MAPPINGS =====

pub fn gl_capability(capability: Capability) -> u32 {
    match capability {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::CullFace => glow::CULL_FACE,
        Capability::Blend => glow::BLEND,
        Capability::ClipDistance(i) => glow::CLIP_DISTANCE0 + i,
    }
}

pub fn gl_clear_mask(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

pub fn gl_face(face: Face) -> u32 {
    match face {
        Face::Front => glow::FRONT,
        Face::Back => glow::BACK,
    }
}

pub fn gl_blend_factor(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
    }
}

pub fn gl_polygon_mode(mode: PolygonMode) -> u32 {
    match mode {
        PolygonMode::Fill => glow::FILL,
        PolygonMode::Line => glow::LINE,
    }
}

pub fn gl_primitive(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Points => glow::POINTS,
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::TriangleFan => glow::TRIANGLE_FAN,
        Primitive::Patches(_) => glow::PATCHES,
    }
}

pub fn gl_index_type(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

/// Color buffer selected by `set_draw_buffers_enabled`
pub fn draw_buffer_for(enabled: bool, offscreen: bool) -> u32 {
    match (enabled, offscreen) {
        (false, _) => glow::NONE,
        (true, true) => glow::COLOR_ATTACHMENT0,
        (true, false) => glow::BACK,
    }
}

// ===== DEVICE =====

pub struct GlGraphicsDevice {
    gl: Rc<glow::Context>,
    current_program: Option<glow::Program>,
    current_framebuffer: Option<glow::Framebuffer>,
}

impl GlGraphicsDevice {
    /// Wrap a context that is current on this thread
    pub fn new(gl: Rc<glow::Context>) -> Self {
        unsafe {
            engine_info!(
                "billiard::gl",
                "OpenGL {} | GLSL {} | {} ({})",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
                gl.get_parameter_string(glow::RENDERER),
                gl.get_parameter_string(glow::VENDOR)
            );
        }
        Self {
            gl,
            current_program: None,
            current_framebuffer: None,
        }
    }

    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    type Buffer = GlBuffer;
    type VertexArray = GlVertexArray;
    type Texture = GlTexture;
    type Renderbuffer = GlRenderbuffer;
    type Framebuffer = GlFramebuffer;
    type Program = GlProgram;

    // ===== RESOURCE CREATION =====

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<GlBuffer> {
        GlBuffer::new(self.gl.clone(), kind, data)
    }

    fn create_vertex_array(
        &mut self,
        vertices: &GlBuffer,
        indices: Option<&GlBuffer>,
        layout: &VertexLayout,
    ) -> Result<GlVertexArray> {
        GlVertexArray::new(self.gl.clone(), vertices, indices, layout)
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<GlTexture> {
        GlTexture::new(self.gl.clone(), desc)
    }

    fn create_renderbuffer(&mut self, format: TextureFormat, width: u32, height: u32) -> Result<GlRenderbuffer> {
        GlRenderbuffer::new(self.gl.clone(), format, width, height)
    }

    fn create_framebuffer(
        &mut self,
        label: &str,
        color: ColorAttachment<'_, GlTexture, GlRenderbuffer>,
        depth_stencil: Option<&GlTexture>,
    ) -> Result<GlFramebuffer> {
        let framebuffer = GlFramebuffer::new(self.gl.clone(), label, color, depth_stencil);
        // creation leaves the default target bound
        self.current_framebuffer = None;
        framebuffer
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<GlProgram> {
        GlProgram::new(self.gl.clone(), desc)
    }

    // ===== PROGRAM STATE =====

    fn bind_program(&mut self, program: Option<&GlProgram>) {
        let program = program.map(|p| p.program);
        unsafe { self.gl.use_program(program) };
        self.current_program = program;
    }

    fn set_uniform(&mut self, program: &GlProgram, name: &str, value: UniformValue) {
        if self.current_program == Some(program.program) {
            program.apply(name, &value);
            return;
        }
        unsafe { self.gl.use_program(Some(program.program)) };
        program.apply(name, &value);
        unsafe { self.gl.use_program(self.current_program) };
    }

    // ===== BINDINGS =====

    fn bind_framebuffer(&mut self, framebuffer: Option<&GlFramebuffer>) {
        let framebuffer = framebuffer.map(|f| f.framebuffer);
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) };
        self.current_framebuffer = framebuffer;
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&GlTexture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            match texture {
                Some(t) => self.gl.bind_texture(t.target, Some(t.texture)),
                None => self.gl.bind_texture(glow::TEXTURE_2D, None),
            }
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<&GlVertexArray>) {
        unsafe { self.gl.bind_vertex_array(vertex_array.map(|v| v.vertex_array)) };
    }

    fn set_draw_buffers_enabled(&mut self, enabled: bool) {
        let buffer = draw_buffer_for(enabled, self.current_framebuffer.is_some());
        unsafe {
            self.gl.draw_buffer(buffer);
            self.gl.read_buffer(buffer);
        }
    }

    // ===== FIXED FUNCTION STATE =====

    fn viewport(&mut self, viewport: Viewport) {
        unsafe {
            self.gl
                .viewport(viewport.x, viewport.y, viewport.width as i32, viewport.height as i32)
        };
    }

    fn clear_color(&mut self, color: Vec4) {
        unsafe { self.gl.clear_color(color.x, color.y, color.z, color.w) };
    }

    fn clear(&mut self, flags: ClearFlags) {
        unsafe { self.gl.clear(gl_clear_mask(flags)) };
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let cap = gl_capability(capability);
        unsafe {
            if enabled {
                self.gl.enable(cap);
            } else {
                self.gl.disable(cap);
            }
        }
    }

    fn cull_face(&mut self, face: Face) {
        unsafe { self.gl.cull_face(gl_face(face)) };
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        unsafe { self.gl.blend_func(gl_blend_factor(src), gl_blend_factor(dst)) };
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        unsafe { self.gl.polygon_mode(glow::FRONT_AND_BACK, gl_polygon_mode(mode)) };
    }

    fn color_mask(&mut self, enabled: bool) {
        unsafe { self.gl.color_mask(enabled, enabled, enabled, enabled) };
    }

    // ===== DRAWING =====

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) {
        self.set_patch_size(primitive);
        unsafe { self.gl.draw_arrays(gl_primitive(primitive), first as i32, count as i32) };
    }

    fn draw_elements(&mut self, primitive: Primitive, count: u32, index_type: IndexType) {
        self.set_patch_size(primitive);
        unsafe {
            self.gl
                .draw_elements(gl_primitive(primitive), count as i32, gl_index_type(index_type), 0)
        };
    }

    fn flush(&mut self) {
        unsafe { self.gl.flush() };
    }

    fn poll_error(&mut self) -> Option<String> {
        let code = unsafe { self.gl.get_error() };
        if code == glow::NO_ERROR {
            return None;
        }
        gl_debug::record_polled_error();
        Some(gl_debug::error_name(code))
    }
}

impl GlGraphicsDevice {
    fn set_patch_size(&mut self, primitive: Primitive) {
        if let Primitive::Patches(vertices) = primitive {
            unsafe { self.gl.patch_parameter_i32(glow::PATCH_VERTICES, vertices as i32) };
        }
    }
}

#[cfg(test)]
#[path = "gl_device_tests.rs"]
mod tests;
