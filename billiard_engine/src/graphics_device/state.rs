/// Fixed-function pipeline state and draw primitives

use bitflags::bitflags;

bitflags! {
    /// Buffers cleared by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Toggleable server-side capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
    CullFace,
    Blend,
    /// GL_CLIP_DISTANCE0 + index
    ClipDistance(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Triangles,
    TriangleFan,
    /// Tessellation patches with the given vertex count
    Patches(u32),
}

/// Viewport rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn sized(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}
