use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use taskcard_adapter::{
    MockWalletSigner, Result, Task, TaskId, TaskService, TaskServiceError, TaskStatus,
};
use taskcard_viewer::card::{ApplyOutcome, CardFuture, CardServices, CardUpdate, TaskCard};
use taskcard_viewer::clipboard::MemoryClipboard;
use taskcard_viewer::notify::RecordingNotifier;
use tokio::sync::Notify;

#[allow(dead_code)]
pub const WALLET: &str = "0x00000000000000000000000000000000000000c3";

pub fn sample_task(id: u64, status: TaskStatus) -> Task {
    Task {
        id: TaskId(id),
        status,
        reward: Decimal::new(500, 0),
        title: "Organize community call".to_string(),
        metadata: "ipfs://bafy/call.png".to_string(),
        creator_role: 1,
        authorized_roles: vec![1, 4],
        assignee: String::new(),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 15).unwrap(),
    }
}

/// Task service answering from a script and recording every call.
/// Successful mutations move the task along its lifecycle.
pub struct ScriptedTaskService {
    task: Mutex<Task>,
    approvals: u64,
    min_quorum: u64,
    leader: bool,
    member: bool,
    failing: HashSet<&'static str>,
    gate: Mutex<Option<(&'static str, Arc<Notify>)>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedTaskService {
    pub fn new(task: Task) -> Self {
        Self {
            task: Mutex::new(task),
            approvals: 0,
            min_quorum: 1,
            leader: false,
            member: false,
            failing: HashSet::new(),
            gate: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn leader(mut self, leader: bool) -> Self {
        self.leader = leader;
        self
    }

    pub fn member(mut self, member: bool) -> Self {
        self.member = member;
        self
    }

    pub fn approvals(mut self, approvals: u64, min_quorum: u64) -> Self {
        self.approvals = approvals;
        self.min_quorum = min_quorum;
        self
    }

    /// Make the named call fail with a gateway rejection
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Hold the next call of the named operation until the gate is notified
    pub fn gated(self, operation: &'static str, gate: Arc<Notify>) -> Self {
        self.hold_next(operation, gate);
        self
    }

    pub fn hold_next(&self, operation: &'static str, gate: Arc<Notify>) {
        *self.gate.lock().unwrap() = Some((operation, gate));
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|recorded| *recorded == call).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, operation: &'static str, arg: String) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{operation}({arg})"));
        let held = {
            let mut slot = self.gate.lock().unwrap();
            if slot.as_ref().is_some_and(|(gated, _)| *gated == operation) {
                slot.take().map(|(_, gate)| gate)
            } else {
                None
            }
        };
        if let Some(gate) = held {
            gate.notified().await;
        }
        if self.failing.contains(operation) {
            return Err(TaskServiceError::Rejected {
                status: 500,
                message: format!("{operation} reverted"),
            });
        }
        Ok(())
    }

    async fn mutate(&self, operation: &'static str, arg: String, next: TaskStatus) -> Result<()> {
        self.enter(operation, arg).await?;
        self.task.lock().unwrap().status = next;
        Ok(())
    }
}

#[async_trait]
impl TaskService for ScriptedTaskService {
    async fn start_task(&self, task_id: TaskId) -> Result<()> {
        self.mutate("start_task", task_id.to_string(), TaskStatus::Progress).await
    }

    async fn review_task(&self, task_id: TaskId, note: &str) -> Result<()> {
        self.mutate("review_task", format!("{task_id}, {note}"), TaskStatus::Review).await
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<()> {
        self.mutate("complete_task", task_id.to_string(), TaskStatus::Completed).await
    }

    async fn cancel_task(&self, task_id: TaskId) -> Result<()> {
        self.mutate("cancel_task", task_id.to_string(), TaskStatus::Canceled).await
    }

    async fn has_member_role(&self, address: &str) -> Result<bool> {
        self.enter("has_member_role", address.to_string()).await?;
        Ok(self.member)
    }

    async fn has_leader_role(&self, address: &str) -> Result<bool> {
        self.enter("has_leader_role", address.to_string()).await?;
        Ok(self.leader)
    }

    async fn get_quorum_approvals(&self, task_id: TaskId) -> Result<u64> {
        self.enter("get_quorum_approvals", task_id.to_string()).await?;
        Ok(self.approvals)
    }

    async fn get_min_quorum(&self) -> Result<u64> {
        self.enter("get_min_quorum", String::new()).await?;
        Ok(self.min_quorum)
    }

    /// Reads the task before a gate holds the call
    async fn get_task(&self, task_id: TaskId) -> Result<Task> {
        let mut task = self.task.lock().unwrap().clone();
        task.id = task_id;
        self.enter("get_task", task_id.to_string()).await?;
        Ok(task)
    }
}

pub struct Fixture {
    pub card: TaskCard,
    pub service: Arc<ScriptedTaskService>,
    pub notifier: Arc<RecordingNotifier>,
    #[allow(dead_code)]
    pub clipboard: Arc<MemoryClipboard>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new(service: ScriptedTaskService) -> Self {
        Self::with_clipboard(service, MemoryClipboard::default())
    }

    pub fn with_clipboard(service: ScriptedTaskService, clipboard: MemoryClipboard) -> Self {
        let task_id = service.task.lock().unwrap().id;
        let service = Arc::new(service);
        let notifier = Arc::new(RecordingNotifier::default());
        let clipboard = Arc::new(clipboard);
        let services = CardServices {
            service: service.clone(),
            identity: Arc::new(MockWalletSigner::with_address(WALLET)),
            notifier: notifier.clone(),
            clipboard: clipboard.clone(),
        };
        Self {
            card: TaskCard::new(services, task_id, "https://app.example.org"),
            service,
            notifier,
            clipboard,
        }
    }

    /// Mount and apply the initial load
    pub async fn mounted(service: ScriptedTaskService) -> Self {
        let mut fixture = Self::new(service);
        let mount = fixture.card.mount();
        settle(&mut fixture.card, mount).await;
        fixture
    }

    /// Calls other than the refresh queries
    pub fn mutations(&self) -> Vec<String> {
        self.service
            .calls()
            .into_iter()
            .filter(|call| {
                ["start_task", "review_task", "complete_task", "cancel_task"]
                    .iter()
                    .any(|name| call.starts_with(name))
            })
            .collect()
    }
}

#[allow(dead_code)]
pub async fn settle(card: &mut TaskCard, future: CardFuture<Option<CardUpdate>>) -> ApplyOutcome {
    match future.await {
        Some(update) => card.apply(update),
        None => ApplyOutcome::Ignored,
    }
}
