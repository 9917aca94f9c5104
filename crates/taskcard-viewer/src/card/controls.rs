/*
[INPUT]:  Task status and the current wallet's role flags
[OUTPUT]: Set of card controls that may be shown
[POS]:    Card layer - role-gated visibility rules
[UPDATE]: When a control's gating changes
*/

use taskcard_adapter::{RoleFlags, TaskStatus};

use super::action::resolve_action;

/// Controls a card can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Action,
    Approvals,
    Complete,
    Cancel,
    Share,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleControls {
    pub action: bool,
    pub approvals: bool,
    pub complete: bool,
    pub cancel: bool,
    pub share: bool,
}

impl VisibleControls {
    pub fn contains(&self, control: Control) -> bool {
        match control {
            Control::Action => self.action,
            Control::Approvals => self.approvals,
            Control::Complete => self.complete,
            Control::Cancel => self.cancel,
            Control::Share => self.share,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Control> + '_ {
        [
            Control::Action,
            Control::Approvals,
            Control::Complete,
            Control::Cancel,
            Control::Share,
        ]
        .into_iter()
        .filter(|control| self.contains(*control))
    }
}

/// Leader controls need the leader role and a task that is not canceled.
/// Membership never gates anything.
pub fn visible_controls(status: &TaskStatus, roles: RoleFlags) -> VisibleControls {
    let leader_controls = roles.is_leader && *status != TaskStatus::Canceled;
    VisibleControls {
        action: !status.is_final() && resolve_action(status).is_some(),
        approvals: leader_controls,
        complete: leader_controls,
        cancel: leader_controls,
        share: true,
    }
}
