/*
[INPUT]:  Error sources (HTTP, relay rejections, ledger rules, serialization, signing)
[OUTPUT]: Structured error type shared by every task service implementation
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{TaskId, TaskStatus};

/// Main error type for task service calls
#[derive(Error, Debug)]
pub enum TaskServiceError {
    /// HTTP request failed before the gateway answered
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway or contract rejected the call (revert reason in `message`)
    #[error("Transaction rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Caller lacks the role required for the operation
    #[error("{address} is not allowed to {operation} task {task_id}")]
    Unauthorized {
        address: String,
        operation: &'static str,
        task_id: TaskId,
    },

    /// Operation is not valid in the task's current status
    #[error("Cannot {operation} task {task_id} while it is {status}")]
    InvalidTransition {
        task_id: TaskId,
        operation: &'static str,
        status: TaskStatus,
    },

    /// Leader already approved this task
    #[error("{address} already approved task {task_id}")]
    AlreadyApproved { address: String, task_id: TaskId },

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Wallet could not sign the request
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskServiceError {
    /// The contract or ledger refused the call, as opposed to a transport problem
    pub fn is_revert(&self) -> bool {
        matches!(
            self,
            TaskServiceError::Rejected { .. }
                | TaskServiceError::Unauthorized { .. }
                | TaskServiceError::InvalidTransition { .. }
                | TaskServiceError::AlreadyApproved { .. }
        )
    }

    /// Create a rejection from a gateway status and message
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        TaskServiceError::Rejected {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for task service operations
pub type Result<T> = std::result::Result<T, TaskServiceError>;
