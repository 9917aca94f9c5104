/*
[INPUT]:  Relay gateway JSON responses
[OUTPUT]: Typed response structs
[POS]:    Data layer - relay response payloads
[UPDATE]: When relay response schema changes
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleResponse {
    pub granted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalsResponse {
    pub approvals: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumResponse {
    pub min_quorum: u64,
}

/// Acknowledgement of a submitted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Error body returned with non-2xx statuses; `message` carries the revert reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
