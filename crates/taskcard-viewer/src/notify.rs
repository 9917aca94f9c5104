/*
[INPUT]:  Notifier calls from card futures
[OUTPUT]: Timed notification queue for the TUI, recording notifier for tests
[POS]:    Notification channel implementations
[UPDATE]: When toast lifetime or payload changes
*/

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use taskcard_adapter::{Notifier, Severity};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Instant::now(),
        }
    }
}

/// Sending half handed to cards
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        info!(severity = %severity, "{message}");
        if self.tx.send(Notification::new(message, severity)).is_err() {
            debug!("notification hub closed; dropping notification");
        }
    }
}

/// Receiving half owned by the UI loop; keeps the visible toasts
#[derive(Debug)]
pub struct NotificationHub {
    rx: mpsc::UnboundedReceiver<Notification>,
    active: VecDeque<Notification>,
    ttl: Duration,
}

impl NotificationHub {
    pub fn channel(ttl: Duration) -> (ChannelNotifier, NotificationHub) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = NotificationHub {
            rx,
            active: VecDeque::new(),
            ttl,
        };
        (ChannelNotifier { tx }, hub)
    }

    /// Pull everything queued since the last call
    pub fn poll(&mut self) {
        while let Ok(notification) = self.rx.try_recv() {
            if self.active.len() >= MAX_VISIBLE_NOTIFICATIONS {
                self.active.pop_front();
            }
            self.active.push_back(notification);
        }
    }

    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.active
            .retain(|notification| now.saturating_duration_since(notification.created_at) < ttl);
    }

    pub fn dismiss_all(&mut self) {
        self.active.clear();
    }

    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Notifier that only remembers what it was told
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.entries
            .lock()
            .expect("notifier lock")
            .push((message.to_string(), severity));
    }
}
