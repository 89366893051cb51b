//! Transient user notifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long a toast stays up unless the caller says otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Duration used for checkout outcomes and validation failures.
pub const LONG_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warning",
            ToastLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification shown for a while and then dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Displays toasts. Implementations decide how and for how long.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Success, message));
    }

    fn info(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Info, message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Danger, message));
    }
}

/// Keeps every toast in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts shown so far, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Messages shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.success("Book added to cart!");
        notifier.notify(Toast::new(ToastLevel::Danger, "Cart cleared").with_duration(LONG_TOAST_DURATION));

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[0].duration, DEFAULT_TOAST_DURATION);
        assert_eq!(toasts[1].duration, Duration::from_millis(5000));
    }
}
