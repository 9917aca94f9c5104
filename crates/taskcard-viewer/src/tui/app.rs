/*
[INPUT]:  TaskCard view-model, notification hub, log buffer, update channel
[OUTPUT]: AppState driving card futures and tab selection
[POS]:    TUI app state
[UPDATE]: When adding tabs or card interactions
*/

use taskcard_adapter::TaskId;
use tokio::sync::mpsc;
use tracing::debug;

use taskcard_viewer::card::{ApplyOutcome, CardFuture, CardUpdate, TaskCard};
use taskcard_viewer::notify::NotificationHub;

use super::runtime::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Card,
    Logs,
}

pub(super) struct AppState {
    pub(super) card: TaskCard,
    pub(super) hub: NotificationHub,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    updates: mpsc::UnboundedSender<CardUpdate>,
}

impl AppState {
    pub(super) fn new(
        card: TaskCard,
        hub: NotificationHub,
        log_buffer: LogBufferHandle,
        updates: mpsc::UnboundedSender<CardUpdate>,
    ) -> Self {
        Self {
            card,
            hub,
            log_buffer,
            current_tab: Tab::Card,
            status_message: "Ready".to_string(),
            updates,
        }
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Card => Tab::Logs,
            Tab::Logs => Tab::Card,
        };
    }

    pub(super) fn mount(&mut self) {
        let future = self.card.mount();
        self.spawn(Some(future), "loading task");
    }

    pub(super) fn refresh(&mut self) {
        let future = self.card.refresh();
        self.spawn(future, "refreshing");
    }

    pub(super) fn invoke_action(&mut self) {
        let Some(label) = self.card.action_label() else {
            return;
        };
        let future = self.card.invoke_action();
        self.spawn(future, label);
    }

    pub(super) fn complete(&mut self) {
        let future = self.card.complete();
        self.spawn(future, "completing");
    }

    pub(super) fn cancel(&mut self) {
        let future = self.card.cancel();
        self.spawn(future, "canceling");
    }

    pub(super) fn share(&mut self) {
        if let Some(future) = self.card.share() {
            tokio::spawn(future);
        }
    }

    pub(super) fn dismiss_error(&mut self) {
        self.card.dismiss_error();
    }

    /// Step to a neighbouring task id
    pub(super) fn step_task(&mut self, forward: bool) {
        let current = self.card.task_id().0;
        let next = if forward {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1).max(1)
        };
        if next == current {
            return;
        }
        let future = self.card.set_task_id(TaskId(next));
        self.spawn(future, "switching task");
    }

    /// Apply a finished card future; successful submissions trigger a reload
    pub(super) fn apply(&mut self, update: CardUpdate) {
        match self.card.apply(update) {
            ApplyOutcome::Ignored => {}
            ApplyOutcome::Updated => {
                self.status_message = if self.card.state().error.is_open() {
                    "Last call failed".to_string()
                } else {
                    "Up to date".to_string()
                };
            }
            ApplyOutcome::ReloadRequested => self.refresh(),
        }
    }

    fn spawn(&mut self, future: Option<CardFuture<Option<CardUpdate>>>, what: &str) {
        let Some(future) = future else {
            debug!(what, "control not available; ignoring");
            return;
        };
        self.status_message = format!("{what}...");
        let tx = self.updates.clone();
        tokio::spawn(async move {
            if let Some(update) = future.await {
                let _ = tx.send(update);
            }
        });
    }
}
