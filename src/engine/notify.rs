//! engine::notify
//!
//! The injected error sink.
//!
//! A [`Notifier`] is passed into [`KeyTally`](super::KeyTally) at
//! construction; there is no global handler. Notifications are
//! fire-and-forget: the core never inspects a result and an implementation
//! must not panic back into it.
//!
//! # Implementations
//!
//! - [`TracingNotifier`] - emits each error as a `tracing` warning (default)
//! - [`RecordingNotifier`] - keeps every report in memory for later inspection

use std::cell::RefCell;
use std::error::Error;

use tracing::warn;

use super::errors::BatchError;

/// Sink for recoverable errors.
pub trait Notifier {
    /// An error with no underlying cause.
    fn on_error(&self, message: &str);

    /// An error caused by another error.
    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static));
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn on_error(&self, message: &str) {
        (**self).on_error(message)
    }

    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        (**self).on_error_with_cause(message, cause)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn on_error(&self, message: &str) {
        (**self).on_error(message)
    }

    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        (**self).on_error_with_cause(message, cause)
    }
}

/// Route a batch error to the matching notifier method.
pub(crate) fn report<N: Notifier + ?Sized>(notifier: &N, error: &BatchError) {
    let message = error.to_string();
    match error.source() {
        Some(cause) => notifier.on_error_with_cause(&message, cause),
        None => notifier.on_error(&message),
    }
}

/// Logs every error at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn on_error(&self, message: &str) {
        warn!("{message}");
    }

    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        warn!(cause = %cause, "{message}");
    }
}

/// One notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The error message.
    pub message: String,
    /// The rendered cause, if one was given.
    pub cause: Option<String>,
}

/// Keeps every notification in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    reports: RefCell<Vec<Report>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports so far.
    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    /// Just the messages so far.
    pub fn messages(&self) -> Vec<String> {
        self.reports
            .borrow()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Take and clear all reports.
    pub fn drain(&self) -> Vec<Report> {
        std::mem::take(&mut *self.reports.borrow_mut())
    }

    /// Check if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn on_error(&self, message: &str) {
        self.reports.borrow_mut().push(Report {
            message: message.to_string(),
            cause: None,
        });
    }

    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.reports.borrow_mut().push(Report {
            message: message.to_string(),
            cause: Some(cause.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::OverflowCause;

    #[test]
    fn report_without_cause_uses_on_error() {
        let recorder = RecordingNotifier::new();
        report(
            &recorder,
            &BatchError::InvalidFormat {
                token: "x".to_string(),
            },
        );
        assert_eq!(
            recorder.reports(),
            vec![Report {
                message: "Invalid format.".to_string(),
                cause: None,
            }]
        );
    }

    #[test]
    fn report_with_cause_uses_on_error_with_cause() {
        let recorder = RecordingNotifier::new();
        report(
            &recorder,
            &BatchError::IntegerOverflow {
                key: "A".to_string(),
                source: OverflowCause::Sum {
                    lhs: i32::MAX,
                    rhs: 1,
                },
            },
        );
        let reports = recorder.reports();
        assert_eq!(reports[0].message, "The integer value overflows.");
        assert_eq!(
            reports[0].cause.as_deref(),
            Some("2147483647 + 1 exceeds the 32-bit signed range")
        );
    }

    #[test]
    fn drain_clears() {
        let recorder = RecordingNotifier::new();
        recorder.on_error("one");
        recorder.on_error("two");
        assert_eq!(recorder.drain().len(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn references_and_boxes_forward() {
        let recorder = RecordingNotifier::new();
        let by_ref: &dyn Notifier = &recorder;
        by_ref.on_error("ref");
        let boxed: Box<&RecordingNotifier> = Box::new(&recorder);
        boxed.on_error("boxed");
        assert_eq!(recorder.messages(), ["ref", "boxed"]);
    }
}
