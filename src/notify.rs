//! Notification sink.
//!
//! The engine never renders UI; outcomes are reported through a [`Notifier`]
//! supplied at form construction. Hosts plug in whatever surfaces the
//! messages (a toast stack, a status line, a terminal).

use std::fmt;

use parking_lot::Mutex;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotifyKind::Success => "success",
            NotifyKind::Error => "error",
            NotifyKind::Info => "info",
            NotifyKind::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// A single recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NotifyKind,
}

/// Receiver for engine-reported outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotifyKind);
}

/// Sink that drops every notification. Default when a form is built without
/// an explicit notifier.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _kind: NotifyKind) {}
}

/// Sink that records notifications in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Drain recorded notifications, leaving the sink empty.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        self.notices.lock().push(Notice { message: message.to_string(), kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let sink = MemoryNotifier::new();
        sink.notify("saved", NotifyKind::Success);
        sink.notify("oops", NotifyKind::Error);

        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], Notice { message: "saved".into(), kind: NotifyKind::Success });
        assert_eq!(notices[1].kind, NotifyKind::Error);

        assert_eq!(sink.take().len(), 2);
        assert!(sink.notices().is_empty());
    }
}
