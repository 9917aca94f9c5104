/*
[INPUT]:  Relay configuration, acting wallet, TaskService calls
[OUTPUT]: HTTP-backed TaskService implementation
[POS]:    HTTP layer - task relay gateway communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod signature;
pub mod tasks;

pub use client::{RelayConfig, RelayTaskService};
pub use signature::{RequestSigner, SignedHeaders};
