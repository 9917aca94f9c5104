/*
[INPUT]:  Task data, role flags, collaborator handles
[OUTPUT]: Task card view-model, action resolver, control visibility
[POS]:    Card layer - module root
[UPDATE]: When card submodules or exports change
*/

pub mod action;
pub mod controller;
pub mod controls;
pub mod state;

pub use action::{CardAction, Operation, resolve_action};
pub use controller::{
    ApplyOutcome, CardFuture, CardServices, CardUpdate, RefreshSnapshot, TaskCard,
};
pub use controls::{Control, VisibleControls, visible_controls};
pub use state::{CardState, ErrorState};
