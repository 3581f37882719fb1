use std::{fmt::Display, sync::Mutex};

use super::port::{MessageType, ProgressReporter};

/// A reporter that prints nothing and remembers every line it was given
///
/// Handy when driving the setup steps from another program, and in tests that assert on
/// what the user would have been told.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Option<MessageType>, String)>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded line with its message type; plain [`ProgressReporter::report`] lines
    /// have no type.
    #[must_use]
    pub fn lines(&self) -> Vec<(Option<MessageType>, String)> {
        self.lock().clone()
    }

    /// The messages recorded with `message_type`, in order.
    #[must_use]
    pub fn messages(&self, message_type: MessageType) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(kind, _)| *kind == Some(message_type))
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// True if any line of `message_type` contains `needle`.
    #[must_use]
    pub fn contains(&self, message_type: MessageType, needle: &str) -> bool {
        self.messages(message_type)
            .iter()
            .any(|message| message.contains(needle))
    }

    fn record<T: Display>(&self, message_type: Option<MessageType>, message: T) {
        self.lock().push((message_type, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Option<MessageType>, String)>> {
        // A poisoned lock only means another test thread panicked mid-push.
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ProgressReporter for RecordingReporter {
    fn status_line<T: Display>(&self, _message_type: MessageType, message: T) -> String {
        message.to_string()
    }

    fn format<T: Display>(&self, message: T) -> String {
        message.to_string()
    }

    fn report<T: Display>(&self, message: T) {
        self.record(None, message);
    }

    fn report_progress<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Progress), message);
    }

    fn report_success<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Success), message);
    }

    fn report_skip<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Skip), message);
    }

    fn report_info<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Info), message);
    }

    fn report_warning<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Warning), message);
    }

    fn report_error<T: Display>(&self, message: T) {
        self.record(Some(MessageType::Error), message);
    }
}
