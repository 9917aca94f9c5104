/*
[INPUT]:  Share URL text
[OUTPUT]: OSC 52 clipboard escape on the terminal, or an in-memory copy
[POS]:    Clipboard implementations for the share action
[UPDATE]: When adding clipboard backends
*/

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use taskcard_adapter::{Clipboard, ClipboardError};

/// Terminal clipboard through the OSC 52 escape sequence
pub struct Osc52Clipboard<W: Write + Send> {
    writer: Mutex<W>,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

#[async_trait]
impl<W: Write + Send + 'static> Clipboard for Osc52Clipboard<W> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ClipboardError::Unavailable("terminal writer poisoned".to_string()))?;
        writer.write_all(Self::sequence(text).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Clipboard held in memory; optionally refuses every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    failure: Option<String>,
}

impl MemoryClipboard {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(None),
            failure: Some(reason.into()),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("clipboard lock").clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.failure {
            return Err(ClipboardError::Unavailable(reason.clone()));
        }
        *self.contents.lock().expect("clipboard lock") = Some(text.to_string());
        Ok(())
    }
}
