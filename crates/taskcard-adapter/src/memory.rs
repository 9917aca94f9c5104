/*
[INPUT]:  Seeded tasks, leader/member address sets, minimum quorum, acting identity
[OUTPUT]: In-process TaskService with contract-like lifecycle rules
[POS]:    Service layer - local ledger for demo mode and tests
[UPDATE]: When lifecycle rules of the task contract change
*/

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auth::Identity;
use crate::error::{Result, TaskServiceError};
use crate::ports::TaskService;
use crate::types::{Task, TaskId, TaskStatus};

/// Seed data for a [`MemoryTaskService`]
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    tasks: Vec<Task>,
    leaders: Vec<String>,
    members: Vec<String>,
    min_quorum: u64,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            leaders: Vec::new(),
            members: Vec::new(),
            min_quorum: 1,
        }
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn with_leader(mut self, address: impl Into<String>) -> Self {
        self.leaders.push(address.into());
        self
    }

    pub fn with_member(mut self, address: impl Into<String>) -> Self {
        self.members.push(address.into());
        self
    }

    pub fn with_min_quorum(mut self, min_quorum: u64) -> Self {
        self.min_quorum = min_quorum;
        self
    }
}

#[derive(Debug)]
struct TaskRecord {
    task: Task,
    approvals: BTreeSet<String>,
    notes: Vec<String>,
}

#[derive(Debug)]
struct LedgerState {
    records: BTreeMap<TaskId, TaskRecord>,
    leaders: HashSet<String>,
    members: HashSet<String>,
    min_quorum: u64,
}

impl LedgerState {
    fn record_mut(&mut self, task_id: TaskId) -> Result<&mut TaskRecord> {
        self.records
            .get_mut(&task_id)
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    fn is_leader(&self, address: &str) -> bool {
        self.leaders.contains(&normalize(address))
    }

    fn is_participant(&self, address: &str) -> bool {
        let address = normalize(address);
        self.members.contains(&address) || self.leaders.contains(&address)
    }
}

/// Task service backed by an in-process ledger.
///
/// Rules mirror the task contract:
/// - start: `Created -> Progress`, members or leaders, caller becomes assignee
/// - review: `Progress -> Review` or another round in `Review`, members or leaders
/// - complete: leaders only, in `Review`, one approval per leader; the task
///   becomes `Completed` once approvals reach the minimum quorum
/// - cancel: leaders only, from any non-final status
///
/// Addresses compare case-insensitively.
pub struct MemoryTaskService {
    identity: Arc<dyn Identity>,
    state: RwLock<LedgerState>,
}

impl MemoryTaskService {
    pub fn new(identity: Arc<dyn Identity>, ledger: MemoryLedger) -> Self {
        let records = ledger
            .tasks
            .into_iter()
            .map(|task| {
                let record = TaskRecord {
                    task,
                    approvals: BTreeSet::new(),
                    notes: Vec::new(),
                };
                (record.task.id, record)
            })
            .collect();

        let state = LedgerState {
            records,
            leaders: ledger.leaders.iter().map(|a| normalize(a)).collect(),
            members: ledger.members.iter().map(|a| normalize(a)).collect(),
            min_quorum: ledger.min_quorum,
        };

        Self {
            identity,
            state: RwLock::new(state),
        }
    }

    /// Review notes submitted for a task, oldest first
    pub async fn review_notes(&self, task_id: TaskId) -> Result<Vec<String>> {
        let state = self.state.read().await;
        state
            .records
            .get(&task_id)
            .map(|record| record.notes.clone())
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    fn caller(&self) -> String {
        self.identity.current_address()
    }
}

#[async_trait]
impl TaskService for MemoryTaskService {
    async fn start_task(&self, task_id: TaskId) -> Result<()> {
        let caller = self.caller();
        let mut state = self.state.write().await;
        if !state.is_participant(&caller) {
            return Err(unauthorized(caller, "start", task_id));
        }

        let record = state.record_mut(task_id)?;
        if record.task.status != TaskStatus::Created {
            return Err(invalid(task_id, "start", &record.task.status));
        }
        record.task.status = TaskStatus::Progress;
        record.task.assignee = caller.clone();
        info!(task_id = %task_id, address = %caller, "task started");
        Ok(())
    }

    async fn review_task(&self, task_id: TaskId, note: &str) -> Result<()> {
        let caller = self.caller();
        let mut state = self.state.write().await;
        if !state.is_participant(&caller) {
            return Err(unauthorized(caller, "review", task_id));
        }

        let record = state.record_mut(task_id)?;
        match record.task.status {
            TaskStatus::Progress | TaskStatus::Review => {
                record.task.status = TaskStatus::Review;
                record.notes.push(note.to_string());
                info!(task_id = %task_id, address = %caller, "task review submitted");
                Ok(())
            }
            ref other => Err(invalid(task_id, "review", other)),
        }
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<()> {
        let caller = self.caller();
        let mut state = self.state.write().await;
        if !state.is_leader(&caller) {
            return Err(unauthorized(caller, "complete", task_id));
        }

        let min_quorum = state.min_quorum;
        let record = state.record_mut(task_id)?;
        if record.task.status != TaskStatus::Review {
            return Err(invalid(task_id, "complete", &record.task.status));
        }
        if !record.approvals.insert(normalize(&caller)) {
            return Err(TaskServiceError::AlreadyApproved {
                address: caller,
                task_id,
            });
        }

        let approvals = record.approvals.len() as u64;
        debug!(task_id = %task_id, approvals, min_quorum, "approval recorded");
        if approvals >= min_quorum {
            record.task.status = TaskStatus::Completed;
            info!(task_id = %task_id, approvals, "task completed at quorum");
        }
        Ok(())
    }

    async fn cancel_task(&self, task_id: TaskId) -> Result<()> {
        let caller = self.caller();
        let mut state = self.state.write().await;
        if !state.is_leader(&caller) {
            return Err(unauthorized(caller, "cancel", task_id));
        }

        let record = state.record_mut(task_id)?;
        if record.task.status.is_final() {
            return Err(invalid(task_id, "cancel", &record.task.status));
        }
        record.task.status = TaskStatus::Canceled;
        info!(task_id = %task_id, address = %caller, "task canceled");
        Ok(())
    }

    async fn has_member_role(&self, address: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.members.contains(&normalize(address)))
    }

    async fn has_leader_role(&self, address: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.is_leader(address))
    }

    async fn get_quorum_approvals(&self, task_id: TaskId) -> Result<u64> {
        let state = self.state.read().await;
        state
            .records
            .get(&task_id)
            .map(|record| record.approvals.len() as u64)
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    async fn get_min_quorum(&self) -> Result<u64> {
        Ok(self.state.read().await.min_quorum)
    }

    async fn get_task(&self, task_id: TaskId) -> Result<Task> {
        let state = self.state.read().await;
        state
            .records
            .get(&task_id)
            .map(|record| record.task.clone())
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

fn unauthorized(address: String, operation: &'static str, task_id: TaskId) -> TaskServiceError {
    TaskServiceError::Unauthorized {
        address,
        operation,
        task_id,
    }
}

fn invalid(task_id: TaskId, operation: &'static str, status: &TaskStatus) -> TaskServiceError {
    TaskServiceError::InvalidTransition {
        task_id,
        operation,
        status: status.clone(),
    }
}
