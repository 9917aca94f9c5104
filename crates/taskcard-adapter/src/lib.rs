/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public task adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod error;
pub mod http;
pub mod memory;
pub mod ports;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{EvmWalletSigner, Identity, MockWalletSigner, WalletSigner};

pub use error::{Result, TaskServiceError};

// Re-export commonly used types from http
pub use http::{RelayConfig, RelayTaskService, RequestSigner};

pub use memory::{MemoryLedger, MemoryTaskService};

pub use ports::{Clipboard, ClipboardError, Notifier, TaskService};

// Re-export all types
pub use types::*;
