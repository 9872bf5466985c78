// Console activity log.
// User-visible record of run, export, and configuration events.

use chrono::{DateTime, Utc};

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Error, message)
    }
}

/// Bounded activity log; oldest messages are dropped first.
#[derive(Debug)]
pub struct Console {
    messages: Vec<ConsoleMessage>,
    capacity: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl Console {
    const DEFAULT_CAPACITY: usize = 200;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: ConsoleMessage) {
        if self.messages.len() == self.capacity {
            self.messages.remove(0);
        }
        self.messages.push(message);
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::info(message));
    }

    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::warn(message));
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::error(message));
    }

    pub fn latest(&self) -> Option<&ConsoleMessage> {
        self.messages.last()
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }
}
