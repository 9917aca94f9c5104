/*
[INPUT]:  TUI app state and card view-model for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod card;
mod layout;
mod logs;
mod notifications;

pub(in crate::tui) use card::draw_card;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use notifications::draw_notifications;
