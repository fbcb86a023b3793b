/// GL debug reporting: error names, message statistics and the KHR_debug
/// callback.
///
/// Errors drained through `glGetError` and messages delivered by the debug
/// callback are counted in process-wide atomic counters so the demo can print
/// a summary report on exit.

#[cfg(any(test, feature = "gl-debug-output"))]
use billiard_engine::billiard::log::LogSeverity;
#[cfg(any(test, feature = "gl-debug-output"))]
use billiard_engine::billiard::Engine;
use colored::*;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Global debug statistics (thread-safe atomic counters)
static GL_STATS: GlStatsTracker = GlStatsTracker::new();

/// Occurrences per debug message text, for grouping repeats
static MESSAGE_TRACKER: Mutex<Option<FxHashMap<String, u32>>> = Mutex::new(None);

/// Snapshot of the GL debug counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlStats {
    /// Errors returned by `glGetError`
    pub polled_errors: u32,
    /// Debug messages with HIGH severity
    pub errors: u32,
    /// Debug messages with MEDIUM severity
    pub warnings: u32,
    /// Debug messages with LOW severity
    pub info: u32,
    /// Debug notifications
    pub notifications: u32,
}

impl GlStats {
    pub fn total(&self) -> u32 {
        self.polled_errors + self.errors + self.warnings + self.info + self.notifications
    }
}

struct GlStatsTracker {
    polled_errors: AtomicU32,
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
    notifications: AtomicU32,
}

impl GlStatsTracker {
    const fn new() -> Self {
        Self {
            polled_errors: AtomicU32::new(0),
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
            notifications: AtomicU32::new(0),
        }
    }

    #[cfg(any(test, feature = "gl-debug-output"))]
    fn counter(&self, severity: u32) -> &AtomicU32 {
        match severity {
            glow::DEBUG_SEVERITY_HIGH => &self.errors,
            glow::DEBUG_SEVERITY_MEDIUM => &self.warnings,
            glow::DEBUG_SEVERITY_LOW => &self.info,
            _ => &self.notifications,
        }
    }

    fn get_stats(&self) -> GlStats {
        GlStats {
            polled_errors: self.polled_errors.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.polled_errors.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
        self.info.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
    }
}

/// Readable name of a `glGetError` code
pub fn error_name(code: u32) -> String {
    let name = match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => return format!("GL error 0x{:04X}", code),
    };
    name.to_string()
}

/// Count one error drained from `glGetError`
pub(crate) fn record_polled_error() {
    GL_STATS.polled_errors.fetch_add(1, Ordering::Relaxed);
}

/// Engine log severity for a KHR_debug message severity
#[cfg(any(test, feature = "gl-debug-output"))]
pub fn debug_severity(severity: u32) -> LogSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        _ => LogSeverity::Trace,
    }
}

#[cfg(any(test, feature = "gl-debug-output"))]
fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

#[cfg(any(test, feature = "gl-debug-output"))]
fn type_name(gltype: u32) -> &'static str {
    match gltype {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        _ => "Other",
    }
}

#[cfg(any(test, feature = "gl-debug-output"))]
fn track_message(message: &str) -> u32 {
    match MESSAGE_TRACKER.lock() {
        Ok(mut guard) => {
            let count = guard.get_or_insert_with(FxHashMap::default).entry(message.to_string()).or_insert(0);
            *count += 1;
            *count
        }
        Err(_) => 1,
    }
}

/// One-line form of a debug message, with a repeat marker after the first
/// occurrence
#[cfg(any(test, feature = "gl-debug-output"))]
pub fn format_debug_message(source: u32, gltype: u32, id: u32, message: &str, occurrence: u32) -> String {
    let repeat = if occurrence > 1 {
        format!(" [x{}]", occurrence)
    } else {
        String::new()
    };
    format!(
        "[{} / {}] #{}{}: {}",
        source_name(source),
        type_name(gltype),
        id,
        repeat,
        message.trim_end()
    )
}

/// KHR_debug callback: count the message and forward it to the engine logger
#[cfg(any(test, feature = "gl-debug-output"))]
pub fn debug_callback(source: u32, gltype: u32, id: u32, severity: u32, message: &str) {
    GL_STATS.counter(severity).fetch_add(1, Ordering::Relaxed);
    let occurrence = track_message(message);
    let text = format_debug_message(source, gltype, id, message, occurrence);
    Engine::log(debug_severity(severity), "billiard::gl::Debug", text);
}

/// Route KHR_debug messages to `debug_callback`.
///
/// Core 4.1 only has the callback through the extension; drivers without it
/// keep polling through `glGetError`.
#[cfg(feature = "gl-debug-output")]
pub(crate) fn install_debug_output(gl: &mut glow::Context) -> bool {
    use glow::HasContext;

    if !gl.supports_debug() {
        billiard_engine::engine_warn!("billiard::gl::Debug", "KHR_debug unavailable, debug output disabled");
        return false;
    }
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(debug_callback);
    }
    billiard_engine::engine_info!("billiard::gl::Debug", "Debug output enabled");
    true
}

/// Reset the counters and the repeat tracker
pub fn reset_gl_stats() {
    GL_STATS.reset();
    if let Ok(mut guard) = MESSAGE_TRACKER.lock() {
        *guard = None;
    }
}

/// Current GL debug statistics
pub fn get_gl_stats() -> GlStats {
    GL_STATS.get_stats()
}

/// Print the GL debug statistics report
pub fn print_gl_stats_report() {
    let stats = get_gl_stats();

    if stats.total() == 0 {
        println!("\n{}", "No GL errors or debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== GL Debug Statistics Report ===".bright_blue().bold());

    if stats.polled_errors > 0 {
        println!("  {} {}", "glGetError:".red().bold(), stats.polled_errors);
    }
    if stats.errors > 0 {
        println!("  {} {}", "Errors:".red().bold(), stats.errors);
    }
    if stats.warnings > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), stats.warnings);
    }
    if stats.info > 0 {
        println!("  {} {}", "Info:".cyan(), stats.info);
    }
    if stats.notifications > 0 {
        println!("  {} {}", "Notifications:".bright_black(), stats.notifications);
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(guard) = MESSAGE_TRACKER.lock() {
        if let Some(tracker) = guard.as_ref() {
            let repeated = tracker.values().filter(|&&count| count > 1).count();
            if repeated > 0 {
                println!("\n  {} message(s) appeared multiple times", repeated);
            }
        }
    }

    println!("{}\n", "==================================".bright_blue().bold());
}

#[cfg(test)]
#[path = "gl_debug_tests.rs"]
mod tests;
