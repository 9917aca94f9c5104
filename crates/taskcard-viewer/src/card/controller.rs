/*
[INPUT]:  Task service, wallet identity, notifier and clipboard collaborators
[OUTPUT]: TaskCard view-model plus detached futures producing CardUpdate values
[POS]:    Card layer - orchestrates service calls and applies their results
[UPDATE]: When card operations or lifecycle rules change
*/

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use taskcard_adapter::{
    ApprovalSummary, Clipboard, Identity, Notifier, RoleFlags, Severity, Task, TaskId,
    TaskService, TaskStatus,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::action::{CardAction, Operation, resolve_action};
use super::controls::{VisibleControls, visible_controls};
use super::state::CardState;

/// Detached card work. Spawn it, then feed its output back through
/// [`TaskCard::apply`].
pub type CardFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

pub const SHARE_SUCCESS_MESSAGE: &str = "Copy to Clipboard";

/// Collaborators a card talks to
#[derive(Clone)]
pub struct CardServices {
    pub service: Arc<dyn TaskService>,
    pub identity: Arc<dyn Identity>,
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Results of a refresh, gathered concurrently
#[derive(Debug, Clone)]
pub struct RefreshSnapshot {
    pub task: Result<Task, String>,
    pub approvals: Result<ApprovalSummary, String>,
    pub roles: RoleFlags,
}

/// Output of card futures. `generation` ties it to the task it was issued
/// for; `seq` orders refreshes of the same task by issue time.
#[derive(Debug, Clone)]
pub enum CardUpdate {
    Refreshed {
        generation: u64,
        seq: u64,
        snapshot: RefreshSnapshot,
    },
    Submitted {
        generation: u64,
        operation: Operation,
    },
    Failed {
        generation: u64,
        operation: Operation,
        message: String,
    },
}

impl CardUpdate {
    fn generation(&self) -> u64 {
        match self {
            CardUpdate::Refreshed { generation, .. }
            | CardUpdate::Submitted { generation, .. }
            | CardUpdate::Failed { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Stale or post-unmount result, dropped
    Ignored,
    Updated,
    /// A submission went through; reload the task to observe it
    ReloadRequested,
}

/// View-model for one task card.
///
/// The card never changes the task itself. Every mutation goes through the
/// task service and shows up only after the next refresh.
pub struct TaskCard {
    services: CardServices,
    share_base_url: String,
    task_id: TaskId,
    generation: u64,
    refresh_issued: u64,
    refresh_applied: u64,
    lifecycle: Option<CancellationToken>,
    state: CardState,
}

impl TaskCard {
    pub fn new(services: CardServices, task_id: TaskId, share_base_url: impl Into<String>) -> Self {
        Self {
            services,
            share_base_url: share_base_url.into(),
            task_id,
            generation: 0,
            refresh_issued: 0,
            refresh_applied: 0,
            lifecycle: None,
            state: CardState::loading(),
        }
    }

    /// Start from task data already at hand
    pub fn with_task(mut self, task: Task) -> Self {
        self.task_id = task.id;
        self.install_task(task);
        self
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_some()
    }

    pub fn status(&self) -> Option<&TaskStatus> {
        self.state.task.as_ref().map(|task| &task.status)
    }

    pub fn action(&self) -> Option<CardAction> {
        self.state.action
    }

    pub fn action_label(&self) -> Option<&'static str> {
        self.state.action.map(|action| action.label)
    }

    pub fn approvals_text(&self) -> String {
        self.state.approvals_text()
    }

    /// Nothing but share is offered until the task is known
    pub fn controls(&self) -> VisibleControls {
        match self.status() {
            Some(status) => visible_controls(status, self.state.roles),
            None => VisibleControls {
                share: true,
                ..VisibleControls::default()
            },
        }
    }

    pub fn share_url(&self) -> String {
        format!(
            "{}/tasks/{}",
            self.share_base_url.trim_end_matches('/'),
            self.task_id
        )
    }

    pub fn dismiss_error(&mut self) {
        self.state.error.dismiss();
    }

    /// Attach the card and load everything it displays
    pub fn mount(&mut self) -> CardFuture<Option<CardUpdate>> {
        if let Some(token) = self.lifecycle.take() {
            token.cancel();
        }
        self.lifecycle = Some(CancellationToken::new());
        self.refresh_future()
    }

    /// Detach the card; results still in flight are discarded
    pub fn unmount(&mut self) {
        if let Some(token) = self.lifecycle.take() {
            debug!(task_id = %self.task_id, "task card unmounted");
            token.cancel();
        }
    }

    /// Point the card at another task
    pub fn set_task_id(&mut self, task_id: TaskId) -> Option<CardFuture<Option<CardUpdate>>> {
        if task_id == self.task_id {
            return None;
        }
        self.task_id = task_id;
        self.generation += 1;
        self.state = CardState::loading();
        self.refresh()
    }

    /// New task data from the host; re-runs the fetches
    pub fn set_task(&mut self, task: Task) -> Option<CardFuture<Option<CardUpdate>>> {
        if task.id != self.task_id {
            self.task_id = task.id;
            self.generation += 1;
            self.state = CardState::loading();
        }
        self.install_task(task);
        self.refresh()
    }

    pub fn refresh(&mut self) -> Option<CardFuture<Option<CardUpdate>>> {
        self.lifecycle.as_ref()?;
        Some(self.refresh_future())
    }

    /// Fire the primary action for the current status
    pub fn invoke_action(&self) -> Option<CardFuture<Option<CardUpdate>>> {
        if !self.controls().action {
            return None;
        }
        let action = self.state.action?;
        self.submit(action.operation)
    }

    pub fn complete(&self) -> Option<CardFuture<Option<CardUpdate>>> {
        if !self.controls().complete {
            return None;
        }
        self.submit(Operation::Complete)
    }

    pub fn cancel(&self) -> Option<CardFuture<Option<CardUpdate>>> {
        if !self.controls().cancel {
            return None;
        }
        self.submit(Operation::Cancel)
    }

    /// Copy the card URL. Failures are reported through the notifier only.
    pub fn share(&self) -> Option<CardFuture<()>> {
        let token = self.lifecycle.clone()?;
        let clipboard = self.services.clipboard.clone();
        let notifier = self.services.notifier.clone();
        let url = self.share_url();

        Some(Box::pin(async move {
            let result = clipboard.write_text(&url).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(()) => notifier.notify(SHARE_SUCCESS_MESSAGE, Severity::Info),
                Err(err) => {
                    error!(url = %url, error = %err, "failed to copy task url");
                    notifier.notify(&err.to_string(), Severity::Error);
                }
            }
        }))
    }

    /// Apply a finished future's result to the display state
    pub fn apply(&mut self, update: CardUpdate) -> ApplyOutcome {
        if !self.is_mounted() || update.generation() != self.generation {
            debug!(
                task_id = %self.task_id,
                generation = update.generation(),
                current = self.generation,
                "dropping stale card update"
            );
            return ApplyOutcome::Ignored;
        }

        match update {
            CardUpdate::Refreshed { seq, .. } if seq < self.refresh_applied => {
                debug!(
                    task_id = %self.task_id,
                    seq,
                    newest = self.refresh_applied,
                    "dropping refresh overtaken by a newer one"
                );
                ApplyOutcome::Ignored
            }
            CardUpdate::Refreshed { seq, snapshot, .. } => {
                self.refresh_applied = seq;
                self.state.loading = false;
                match snapshot.task {
                    Ok(task) => self.install_task(task),
                    Err(message) => self.state.error.raise(message),
                }
                match snapshot.approvals {
                    Ok(summary) => self.state.approvals = Some(summary),
                    Err(message) => self.state.error.raise(message),
                }
                self.state.roles = snapshot.roles;
                ApplyOutcome::Updated
            }
            CardUpdate::Submitted { .. } => ApplyOutcome::ReloadRequested,
            CardUpdate::Failed { message, .. } => {
                self.state.error.raise(message);
                ApplyOutcome::Updated
            }
        }
    }

    fn install_task(&mut self, task: Task) {
        let action = resolve_action(&task.status);
        if action.is_none() {
            if let TaskStatus::Unknown(raw) = &task.status {
                warn!(task_id = %task.id, status = %raw, "task has an unrecognized status; no action offered");
            }
        }
        self.state.action = action;
        self.state.loading = false;
        self.state.task = Some(task);
    }

    fn refresh_future(&mut self) -> CardFuture<Option<CardUpdate>> {
        self.refresh_issued += 1;
        let seq = self.refresh_issued;
        let token = self.lifecycle.clone().unwrap_or_default();
        let service = self.services.service.clone();
        let address = self.services.identity.current_address();
        let task_id = self.task_id;
        let generation = self.generation;

        Box::pin(async move {
            let (task, approvals, leader, member) = tokio::join!(
                service.get_task(task_id),
                fetch_approvals(service.as_ref(), task_id),
                service.has_leader_role(&address),
                service.has_member_role(&address),
            );
            if token.is_cancelled() {
                return None;
            }

            let roles = RoleFlags {
                is_leader: role_or_false(leader, "leader", &address),
                is_member: role_or_false(member, "member", &address),
            };
            let snapshot = RefreshSnapshot {
                task: task.map_err(|err| err.to_string()),
                approvals: approvals.map_err(|err| err.to_string()),
                roles,
            };
            Some(CardUpdate::Refreshed {
                generation,
                seq,
                snapshot,
            })
        })
    }

    fn submit(&self, operation: Operation) -> Option<CardFuture<Option<CardUpdate>>> {
        let token = self.lifecycle.clone()?;
        let service = self.services.service.clone();
        let notifier = self.services.notifier.clone();
        let task_id = self.task_id;
        let generation = self.generation;

        Some(Box::pin(async move {
            let result = match operation {
                Operation::Start => service.start_task(task_id).await,
                Operation::Review { note } => service.review_task(task_id, note).await,
                Operation::Complete => service.complete_task(task_id).await,
                Operation::Cancel => service.cancel_task(task_id).await,
            };
            if token.is_cancelled() {
                debug!(task_id = %task_id, operation = operation.name(), "card gone; result dropped");
                return None;
            }

            match result {
                Ok(()) => {
                    notifier.notify(operation.success_message(), operation.severity());
                    Some(CardUpdate::Submitted {
                        generation,
                        operation,
                    })
                }
                Err(err) => {
                    warn!(task_id = %task_id, operation = operation.name(), error = %err, "task call failed");
                    Some(CardUpdate::Failed {
                        generation,
                        operation,
                        message: err.to_string(),
                    })
                }
            }
        }))
    }
}

async fn fetch_approvals(
    service: &dyn TaskService,
    task_id: TaskId,
) -> taskcard_adapter::Result<ApprovalSummary> {
    let (approvals, min_quorum) =
        tokio::try_join!(service.get_quorum_approvals(task_id), service.get_min_quorum())?;
    Ok(ApprovalSummary::new(approvals, min_quorum))
}

fn role_or_false(result: taskcard_adapter::Result<bool>, role: &str, address: &str) -> bool {
    result.unwrap_or_else(|err| {
        warn!(role, address, error = %err, "role query failed");
        false
    })
}
