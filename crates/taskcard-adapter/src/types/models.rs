/*
[INPUT]:  Task records returned by the task contract and relay gateway
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - task model and derived read-only summaries
[UPDATE]: When the task record layout changes
*/

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;

/// On-chain task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        TaskId(value)
    }
}

/// A task as the contract reports it. Views treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub status: TaskStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub reward: Decimal,
    pub title: String,
    /// Image reference (usually an ipfs:// or https:// URI)
    #[serde(default)]
    pub metadata: String,
    pub creator_role: u64,
    #[serde(default)]
    pub authorized_roles: Vec<u64>,
    #[serde(default)]
    pub assignee: String,
    pub end_date: NaiveDate,
}

/// Current approvals against the minimum quorum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSummary {
    pub approvals: u64,
    pub min_quorum: u64,
}

impl ApprovalSummary {
    pub fn new(approvals: u64, min_quorum: u64) -> Self {
        Self {
            approvals,
            min_quorum,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.approvals >= self.min_quorum
    }
}

/// Rendered as `" (approvals/quorum)"`, leading space included
impl fmt::Display for ApprovalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ({}/{})", self.approvals, self.min_quorum)
    }
}

/// Role membership of the current wallet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub is_member: bool,
    pub is_leader: bool,
}
