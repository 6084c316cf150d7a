// 📋 Log Service - level-tagged diagnostic lines
// Single output surface for the whole crate; nothing else writes to stdout

use chrono::Utc;

// ============================================================================
// LOG LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

// ============================================================================
// LOGGER
// ============================================================================

/// Line logger with a verbosity gate.
///
/// Debug and Info lines are instrumentation and only appear when verbose is
/// enabled. Warn and Error always go to stderr.
#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Logger { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Format one line: [MANYJSON-LEVEL] <RFC 3339 UTC> - <message>
    fn format_line(level: LogLevel, message: &str) -> String {
        format!(
            "[MANYJSON-{}] {} - {}",
            level.as_str(),
            Utc::now().to_rfc3339(),
            message
        )
    }

    fn emit(&self, level: LogLevel, message: &str) {
        if level < LogLevel::Warn && !self.verbose {
            return;
        }

        let line = Self::format_line(level, message);
        match level {
            LogLevel::Warn | LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(false)
    }
}

// ============================================================================
// TESTS
// ============================================================================
