// ABOUTME: System clipboard backed by arboard
// ABOUTME: Degrades to a reported error when no clipboard is reachable (e.g. headless sessions)

use bionic_workflows::{Clipboard, ClipboardError};
use tracing::warn;

pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("System clipboard unavailable: {}", e);
                None
            }
        };
        Self { inner }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| ClipboardError("no system clipboard".to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
