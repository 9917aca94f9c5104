/*
[INPUT]:  Results applied by the card controller
[OUTPUT]: Local display state of a task card
[POS]:    Card layer - view state (never authoritative for the task)
[UPDATE]: When the card displays new derived data
*/

use taskcard_adapter::{ApprovalSummary, RoleFlags, Task};

use super::action::CardAction;

/// Latest error plus whether it is currently shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    message: Option<String>,
    open: bool,
}

impl ErrorState {
    pub fn raise(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.open = true;
    }

    /// Hide the banner; the message stays available
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Message to display, only while open
    pub fn visible_message(&self) -> Option<&str> {
        if self.open { self.message() } else { None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub task: Option<Task>,
    pub loading: bool,
    pub action: Option<CardAction>,
    pub approvals: Option<ApprovalSummary>,
    pub roles: RoleFlags,
    pub error: ErrorState,
}

impl CardState {
    pub fn loading() -> Self {
        Self {
            task: None,
            loading: true,
            action: None,
            approvals: None,
            roles: RoleFlags::default(),
            error: ErrorState::default(),
        }
    }

    /// `" (2/3)"`, or empty until the summary is known
    pub fn approvals_text(&self) -> String {
        self.approvals
            .map(|summary| summary.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_raise_and_dismiss() {
        let mut error = ErrorState::default();
        assert_eq!(error.visible_message(), None);

        error.raise("execution reverted");
        assert!(error.is_open());
        assert_eq!(error.visible_message(), Some("execution reverted"));

        error.dismiss();
        assert!(!error.is_open());
        assert_eq!(error.visible_message(), None);
        assert_eq!(error.message(), Some("execution reverted"));
    }

    #[test]
    fn test_approvals_text() {
        let mut state = CardState::loading();
        assert_eq!(state.approvals_text(), "");
        state.approvals = Some(ApprovalSummary::new(2, 3));
        assert_eq!(state.approvals_text(), " (2/3)");
    }
}
