/*
[INPUT]:  Text to share
[OUTPUT]: Clipboard write outcome
[POS]:    Ports layer - clipboard access for the share action
[UPDATE]: When clipboard backends change
*/

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
