/// Renderer configuration: window and GL context settings

/// Window and context settings for `GlWindow::new`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Window title
    pub title: String,

    /// Initial inner size in logical pixels
    pub width: u32,
    pub height: u32,

    /// Requested core profile version (major, minor)
    pub gl_version: (u8, u8),

    /// Request a debug context and install the KHR_debug callback
    /// (the callback needs the `gl-debug-output` feature)
    pub debug: bool,

    /// Wait for vertical sync on buffer swap
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "Billiard".to_string(),
            width: 640,
            height: 480,
            gl_version: (4, 1),
            debug: cfg!(debug_assertions),
            vsync: true,
        }
    }
}
