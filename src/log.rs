//! Injectable logging collaborator for the octree containers.
//!
//! This mirrors the teacher engine's internal logging system (`Logger`
//! trait, `LogEntry`, `LogSeverity`, colored console `DefaultLogger`),
//! but without the engine-wide singleton and macros: a container holds
//! its own `Option<Arc<dyn Logger>>` and logs directly through it.
//! Absent a collaborator, messages are silently discarded.

use colored::*;
use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Logger trait for custom logging implementations.
///
/// Implement this to route octree warnings/errors somewhere other than
/// the console (file logging, network logging, a test collector, etc.).
pub trait Logger: Send + Sync {
    /// Log an entry.
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level.
    pub severity: LogSeverity,
    /// Timestamp when the log was created.
    pub timestamp: SystemTime,
    /// Source module (e.g. "galaxy_octree::bounds").
    pub source: String,
    /// Log message.
    pub message: String,
}

impl LogEntry {
    /// Build a warning entry with the current time.
    pub fn warn(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: LogSeverity::Warn, timestamp: SystemTime::now(), source: source.into(), message: message.into() }
    }

    /// Build an error entry with the current time.
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: LogSeverity::Error, timestamp: SystemTime::now(), source: source.into(), message: message.into() }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Development/debugging information.
    Debug,
    /// Important informational messages.
    Info,
    /// Warning messages (potential issues).
    Warn,
    /// Error messages (critical issues).
    Error,
}

/// Default logger implementation using colored console output.
///
/// Format: `[timestamp] [SEVERITY] [source] message`.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        println!("[{}] [{}] [{}] {}", timestamp, severity_str, entry.source.bright_blue(), entry.message);
    }
}
