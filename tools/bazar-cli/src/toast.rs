//! Toasts printed to the terminal.

use std::time::Duration;

use bazar_storefront::{Notifier, Toast, DEFAULT_TOAST_DURATION};

use crate::output::Output;

/// Prints each toast as it is raised.
///
/// A terminal has nothing to dismiss, so durations only matter when they
/// differ from the default: longer toasts are shown in bold.
pub struct TerminalNotifier {
    output: Output,
    default_duration: Duration,
}

impl TerminalNotifier {
    pub fn new(output: Output, default_duration: Duration) -> Self {
        Self {
            output,
            default_duration,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let long = toast.duration > DEFAULT_TOAST_DURATION.max(self.default_duration);
        let message = if long && !self.output.is_json() {
            console::style(&toast.message).bold().to_string()
        } else {
            toast.message
        };
        self.output.toast(toast.level, &message);
    }
}
