//! Error types for the billiard renderer
//!
//! This module defines the error types used throughout the engine,
//! including GPU resource creation, shader building and asset loading.

use std::fmt;

/// Result type for billiard engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Billiard engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL call failure, context loss, etc.)
    BackendError(String),

    /// Initialization failed (window, GL context, subsystems)
    InitializationFailed(String),

    /// Invalid resource (texture, buffer, vertex layout, etc.)
    InvalidResource(String),

    /// A shader stage failed to compile
    ShaderCompilation {
        /// Stage name ("vertex", "fragment", ...)
        stage: String,
        /// Driver info log
        log: String,
    },

    /// A program failed to link (driver info log)
    ProgramLink(String),

    /// `glCheckFramebufferStatus` reported something other than complete
    FramebufferIncomplete(String),

    /// An asset file could not be read or decoded
    AssetLoad {
        /// Path of the asset, relative to the asset root when known
        path: String,
        /// Underlying reason
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ShaderCompilation { stage, log } => {
                write!(f, "Shader compilation failed ({} stage): {}", stage, log)
            }
            Error::ProgramLink(log) => write!(f, "Program link failed: {}", log),
            Error::FramebufferIncomplete(status) => write!(f, "Framebuffer incomplete: {}", status),
            Error::AssetLoad { path, reason } => write!(f, "Cannot load asset '{}': {}", path, reason),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error with file:line and return `Err(Error::BackendError(..))`
/// from the enclosing function.
///
/// # Example
///
/// ```no_run
/// # use billiard_engine::{engine_bail, billiard::Result};
/// fn upload(size: usize) -> Result<()> {
///     if size == 0 {
///         engine_bail!("billiard::gl", "Cannot upload an empty buffer");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        return Err($crate::billiard::Error::BackendError(message));
    }};
}

/// Log an error with file:line and evaluate to `Error::BackendError(..)`.
///
/// Meant for `map_err` / `ok_or_else` closures:
///
/// ```no_run
/// # use billiard_engine::{engine_err, billiard::Result};
/// fn parse(text: &str) -> Result<u32> {
///     text.parse().map_err(|e| engine_err!("billiard::gl", "Bad number '{}': {}", text, e))
/// }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::billiard::Error::BackendError(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
