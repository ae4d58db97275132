//! Transient user-facing notices

use std::time::Duration;

/// Default time a notice stays visible
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message shown for a limited time after a mutation settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            duration,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
