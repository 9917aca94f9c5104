/*
[INPUT]:  Public API exports for the taskcard-viewer crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod bootstrap;
pub mod card;
pub mod clipboard;
pub mod config;
pub mod notify;

// Re-export main types for convenience
pub use bootstrap::{Wallet, WatchOnlyIdentity, build_services};
pub use card::{ApplyOutcome, CardServices, CardUpdate, TaskCard};
pub use clipboard::{MemoryClipboard, Osc52Clipboard};
pub use config::CardConfig;
pub use notify::{ChannelNotifier, NotificationHub, RecordingNotifier};
