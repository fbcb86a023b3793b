/// Billiard engine - process-wide logging facade
///
/// Holds the replaceable global logger, the minimum severity filter and the
/// program name recorded at start-up. Everything else (device, scene, game
/// state) is owned by the caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::Result;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Program name passed to `Engine::initialize`
static PROGRAM_NAME: OnceLock<String> = OnceLock::new();

/// Minimum severity forwarded to the logger, stored as `LogSeverity as u8`
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Trace as u8);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn severity_from_u8(value: u8) -> LogSeverity {
    match value {
        0 => LogSeverity::Trace,
        1 => LogSeverity::Debug,
        2 => LogSeverity::Info,
        3 => LogSeverity::Warn,
        _ => LogSeverity::Error,
    }
}

// ===== PUBLIC API =====

/// Engine facade
///
/// # Example
///
/// ```no_run
/// use billiard_engine::billiard::Engine;
///
/// let argv0 = std::env::args().next().unwrap_or_default();
/// Engine::initialize(&argv0)?;
/// // ... run the event loop ...
/// Engine::shutdown();
/// # Ok::<(), billiard_engine::billiard::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize logging for the process
    ///
    /// Records the program name (first call wins) and logs a start-up line.
    /// Calling it again is harmless.
    pub fn initialize(argv0: &str) -> Result<()> {
        let name = PROGRAM_NAME.get_or_init(|| {
            std::path::Path::new(argv0)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| argv0.to_string())
        });
        crate::engine_info!("billiard::Engine", "{} starting", name);
        Ok(())
    }

    /// Flush the logging side of the engine at process end
    pub fn shutdown() {
        crate::engine_info!("billiard::Engine", "{} done", Self::program_name());
    }

    /// Program name recorded by `initialize`, or "billiard" before that
    pub fn program_name() -> &'static str {
        PROGRAM_NAME.get().map(String::as_str).unwrap_or("billiard")
    }

    // ===== LOGGING API =====

    /// Replace the default logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        severity_from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Logging entry point used by `engine_info!`, `engine_warn!`, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Logging entry point with file:line, used by `engine_error!`
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
