/*
[INPUT]:  Task card view-model, notification hub, and log buffer
[OUTPUT]: Ratatui-based TUI for the task card, toasts, and logs
[POS]:    TUI module for the taskcard-viewer binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogSink, RunOptions, run_tui};
