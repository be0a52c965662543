/// Leveled logging for the preparation tools.
///
/// Provides context-rich messages tagged with the tool that emitted
/// them. Supports console output and an optional append-only log file
/// for batch runs driven from shell scripts.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Merge,
    Prune,
    Sentinel,
    Headers,
    OneHot,
    Cyclical,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Merge => write!(f, "MERGE"),
            Tool::Prune => write!(f, "PRUNE"),
            Tool::Sentinel => write!(f, "SENTINEL"),
            Tool::Headers => write!(f, "HEADERS"),
            Tool::OneHot => write!(f, "ONEHOT"),
            Tool::Cyclical => write!(f, "CYCLICAL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger { min_level, log_file };
        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, tool: Tool, message: &str) {
        if level < self.min_level {
            return;
        }

        match level {
            LogLevel::Error => eprintln!("✗ {}: {}", tool, message),
            LogLevel::Warning => eprintln!("⚠ {}: {}", tool, message),
            LogLevel::Info => println!("{}", message),
            LogLevel::Debug => println!("[DEBUG] {}: {}", tool, message),
        }

        if let Some(ref path) = self.log_file {
            let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            let entry = format!("{} {} {}: {}", timestamp, level, tool, message);
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public logging functions
// ---------------------------------------------------------------------------

/// Initialize the global logger. Without an init call the helpers below
/// fall back to plain console output at Info level.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

fn with_logger(level: LogLevel, tool: Tool, message: &str) {
    let guard = LOGGER.lock().unwrap();
    match guard.as_ref() {
        Some(logger) => logger.log(level, tool, message),
        None => match level {
            LogLevel::Error => eprintln!("✗ {}: {}", tool, message),
            LogLevel::Warning => eprintln!("⚠ {}: {}", tool, message),
            LogLevel::Info => println!("{}", message),
            LogLevel::Debug => {}
        },
    }
}

pub fn info(tool: Tool, message: &str) {
    with_logger(LogLevel::Info, tool, message);
}

pub fn warn(tool: Tool, message: &str) {
    with_logger(LogLevel::Warning, tool, message);
}

pub fn error(tool: Tool, message: &str) {
    with_logger(LogLevel::Error, tool, message);
}

pub fn debug(tool: Tool, message: &str) {
    with_logger(LogLevel::Debug, tool, message);
}

// ---------------------------------------------------------------------------
// Run summary logging
// ---------------------------------------------------------------------------

/// Log a one-line summary of a tool run. Skipped rows promote the
/// summary to a warning so silent data loss stays visible.
pub fn log_run_summary(tool: Tool, rows_in: usize, rows_out: usize, skipped: usize) {
    let message = format!(
        "Run complete: {} rows in, {} rows out, {} skipped",
        rows_in, rows_out, skipped
    );
    if skipped == 0 {
        info(tool, &message);
    } else {
        warn(tool, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_tool_tags_are_distinct() {
        let tags = [
            Tool::Merge.to_string(),
            Tool::Prune.to_string(),
            Tool::Sentinel.to_string(),
            Tool::Headers.to_string(),
            Tool::OneHot.to_string(),
            Tool::Cyclical.to_string(),
        ];
        let mut seen = std::collections::HashSet::new();
        for tag in &tags {
            assert!(seen.insert(tag.clone()), "duplicate tool tag '{}'", tag);
        }
    }
}
