//! Logging capability injected into each bridge.
//!
//! Bridges never reach for a process-wide logger. The default
//! [`TracingLogger`] forwards to `tracing` with the bridge identity as a
//! field; [`MemoryLogger`] keeps entries in memory so a bridge can be
//! inspected in isolation.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

/// Log levels exposed to renderer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Verbose,
    Debug,
    Silly,
}

/// Sink for bridge log lines.
pub trait BridgeLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

/// Logger backed by the global `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    bridge: String,
}

impl TracingLogger {
    pub fn new(bridge: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
        }
    }
}

impl BridgeLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let bridge = self.bridge.as_str();
        match level {
            LogLevel::Error => error!(bridge, "{message}"),
            LogLevel::Warn => warn!(bridge, "{message}"),
            LogLevel::Info => info!(bridge, "{message}"),
            LogLevel::Verbose | LogLevel::Debug => debug!(bridge, "{message}"),
            LogLevel::Silly => trace!(bridge, "{message}"),
        }
    }
}

/// One recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that records entries in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Messages logged at warn level.
    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(LogLevel::Warn)
    }

    /// Messages logged at error level.
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(LogLevel::Error)
    }

    fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }
}

impl BridgeLogger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_logger_clones_share_entries() {
        let logger = MemoryLogger::new();
        let handle = logger.clone();
        logger.warn("first");
        logger.info("second");
        handle.error("third");

        assert_eq!(handle.entries().len(), 3);
        assert_eq!(logger.warnings(), vec!["first".to_string()]);
        assert_eq!(logger.errors(), vec!["third".to_string()]);
    }

    #[test]
    fn separate_memory_loggers_are_independent() {
        let a = MemoryLogger::new();
        let b = MemoryLogger::new();
        a.warn("only in a");
        assert!(b.entries().is_empty());
    }
}
