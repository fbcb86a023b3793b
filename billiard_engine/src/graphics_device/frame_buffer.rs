/// Framebuffer trait - groups one color and one depth/stencil attachment
///
/// Created once and reused each frame. Window-sized framebuffers are
/// recreated on resize.

/// Color attachment of a framebuffer: a sampled texture or a renderbuffer
#[derive(Debug)]
pub enum ColorAttachment<'a, T, R> {
    Texture(&'a T),
    Renderbuffer(&'a R),
}

// Manual impls: derive would require T: Clone / R: Clone
impl<T, R> Clone for ColorAttachment<'_, T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for ColorAttachment<'_, T, R> {}

/// Framebuffer resource trait
///
/// Created via `GraphicsDevice::create_framebuffer()`, destroyed on drop.
pub trait Framebuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;
}
