/*
[INPUT]:  Task contract status strings and notification severities
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - closed value sets shared by services and views
[UPDATE]: When the contract adds a lifecycle state
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a task as reported by the task contract.
///
/// Statuses travel as plain strings ("Created", "Progress", ...). Anything the
/// contract reports that is not in the closed set is kept verbatim in
/// [`TaskStatus::Unknown`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Created,
    Progress,
    Review,
    Completed,
    Canceled,
    Unknown(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Created => "Created",
            TaskStatus::Progress => "Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Completed",
            TaskStatus::Canceled => "Canceled",
            TaskStatus::Unknown(raw) => raw,
        }
    }

    /// Completed and canceled tasks accept no further lifecycle calls
    pub fn is_final(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Canceled)
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Created" => TaskStatus::Created,
            "Progress" => TaskStatus::Progress,
            "Review" => TaskStatus::Review,
            "Completed" => TaskStatus::Completed,
            "Canceled" => TaskStatus::Canceled,
            _ => TaskStatus::Unknown(raw),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(raw: &str) -> Self {
        TaskStatus::from(raw.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity attached to a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_contract_strings() {
        assert_eq!(TaskStatus::from("Created"), TaskStatus::Created);
        assert_eq!(TaskStatus::from("Canceled"), TaskStatus::Canceled);
        assert_eq!(
            TaskStatus::from("Disputed"),
            TaskStatus::Unknown("Disputed".to_string())
        );
    }

    #[test]
    fn test_status_serde_keeps_unknown_verbatim() {
        let status: TaskStatus = serde_json::from_str(r#""Paused""#).unwrap();
        assert_eq!(status, TaskStatus::Unknown("Paused".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Paused""#);
        assert_eq!(
            serde_json::to_string(&TaskStatus::Review).unwrap(),
            r#""Review""#
        );
    }

    #[test]
    fn test_final_statuses() {
        assert!(TaskStatus::Completed.is_final());
        assert!(TaskStatus::Canceled.is_final());
        assert!(!TaskStatus::Review.is_final());
        assert!(!TaskStatus::Unknown("x".into()).is_final());
    }

    #[test]
    fn test_severity_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), r#""warning""#);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
