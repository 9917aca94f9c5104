/*
[INPUT]:  Message text and severity
[OUTPUT]: Transient user notification
[POS]:    Ports layer - notification channel
[UPDATE]: When notification payload changes
*/

use crate::types::Severity;

/// Shared notification channel (snackbar, toast strip, log line...)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}
