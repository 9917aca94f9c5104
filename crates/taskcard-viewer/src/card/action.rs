/*
[INPUT]:  Task lifecycle status
[OUTPUT]: Card action (label + service operation) and operation metadata
[POS]:    Card layer - action resolver
[UPDATE]: When the contract adds a status that advances through the card
*/

use taskcard_adapter::{Severity, TaskStatus};

pub const START_LABEL: &str = "Start Task";
pub const REVIEW_LABEL: &str = "Review Task";

/// Note sent when the assignee hands in work
pub const SUBMIT_REVIEW_NOTE: &str = "Hello, I already finished";
/// Note sent on a follow-up review round
pub const FOLLOW_UP_REVIEW_NOTE: &str = "Awesome, contact me on Discord!";

/// A task service call the card can fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    Review { note: &'static str },
    Complete,
    Cancel,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Review { .. } => "review",
            Operation::Complete => "complete",
            Operation::Cancel => "cancel",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::Start => "Task Start process initiated with success!",
            Operation::Review { .. } => "Review Task process initiated with success!",
            Operation::Complete => "Complete Task process initiated with success!",
            Operation::Cancel => "Cancel Task process initiated with success!",
        }
    }

    /// Cancel is the only destructive call, so it is flagged as a warning
    pub fn severity(&self) -> Severity {
        match self {
            Operation::Cancel => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// The primary card button: what it says and what it calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardAction {
    pub label: &'static str,
    pub operation: Operation,
}

/// Map a status to the action that advances it.
///
/// Final and unrecognized statuses have no action.
pub fn resolve_action(status: &TaskStatus) -> Option<CardAction> {
    match status {
        TaskStatus::Created => Some(CardAction {
            label: START_LABEL,
            operation: Operation::Start,
        }),
        TaskStatus::Progress => Some(CardAction {
            label: REVIEW_LABEL,
            operation: Operation::Review {
                note: SUBMIT_REVIEW_NOTE,
            },
        }),
        TaskStatus::Review => Some(CardAction {
            label: REVIEW_LABEL,
            operation: Operation::Review {
                note: FOLLOW_UP_REVIEW_NOTE,
            },
        }),
        TaskStatus::Completed | TaskStatus::Canceled | TaskStatus::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaskStatus::Created, START_LABEL, Operation::Start)]
    #[case(TaskStatus::Progress, REVIEW_LABEL, Operation::Review { note: SUBMIT_REVIEW_NOTE })]
    #[case(TaskStatus::Review, REVIEW_LABEL, Operation::Review { note: FOLLOW_UP_REVIEW_NOTE })]
    fn test_actionable_statuses(
        #[case] status: TaskStatus,
        #[case] label: &str,
        #[case] operation: Operation,
    ) {
        let action = resolve_action(&status).expect("status should have an action");
        assert_eq!(action.label, label);
        assert_eq!(action.operation, operation);
    }

    #[rstest]
    #[case(TaskStatus::Completed)]
    #[case(TaskStatus::Canceled)]
    #[case(TaskStatus::Unknown("Disputed".to_string()))]
    fn test_inert_statuses(#[case] status: TaskStatus) {
        assert_eq!(resolve_action(&status), None);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Operation::Start.severity(), Severity::Info);
        assert_eq!(Operation::Review { note: "x" }.severity(), Severity::Info);
        assert_eq!(Operation::Complete.severity(), Severity::Info);
        assert_eq!(Operation::Cancel.severity(), Severity::Warning);
    }
}
