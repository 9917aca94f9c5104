/*
[INPUT]:  Task identifiers, review notes, wallet addresses
[OUTPUT]: Lifecycle submissions, role answers, quorum counters
[POS]:    Ports layer - task service contract
[UPDATE]: When the task contract exposes new calls
*/

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Task, TaskId};

/// Task lifecycle operations and role/quorum queries.
///
/// Mutating calls resolve once the transaction is submitted. They fail with a
/// descriptive error on revert or transport failure; callers observe the
/// effect by reading the task again.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn start_task(&self, task_id: TaskId) -> Result<()>;

    async fn review_task(&self, task_id: TaskId, note: &str) -> Result<()>;

    async fn complete_task(&self, task_id: TaskId) -> Result<()>;

    async fn cancel_task(&self, task_id: TaskId) -> Result<()>;

    async fn has_member_role(&self, address: &str) -> Result<bool>;

    async fn has_leader_role(&self, address: &str) -> Result<bool>;

    async fn get_quorum_approvals(&self, task_id: TaskId) -> Result<u64>;

    async fn get_min_quorum(&self) -> Result<u64>;

    async fn get_task(&self, task_id: TaskId) -> Result<Task>;
}
