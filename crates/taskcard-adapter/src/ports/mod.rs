/*
[INPUT]:  Collaborator contracts consumed by task views
[OUTPUT]: TaskService, Notifier and Clipboard traits
[POS]:    Ports layer - seams between views and the outside world
[UPDATE]: When a view needs a new collaborator
*/

pub mod clipboard;
pub mod notifier;
pub mod task_service;

pub use clipboard::{Clipboard, ClipboardError};
pub use notifier::Notifier;
pub use task_service::TaskService;
