/*
[INPUT]:  Crossterm key codes
[OUTPUT]: Card interactions and tab switches on AppState
[POS]:    TUI event routing
[UPDATE]: When changing hotkeys
*/

use crossterm::event::KeyCode;

use super::app::AppState;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise. Keys for controls
/// the card does not currently show do nothing.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Enter => app.invoke_action(),
        KeyCode::Char('c') => app.complete(),
        KeyCode::Char('x') => app.cancel(),
        KeyCode::Char('y') => app.share(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('e') => app.dismiss_error(),
        KeyCode::Char('n') => app.hub.dismiss_all(),
        KeyCode::Char(']') => app.step_task(true),
        KeyCode::Char('[') => app.step_task(false),
        KeyCode::Tab => app.next_tab(),
        _ => {}
    }
    false
}
