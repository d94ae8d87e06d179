//! System clipboard integration via arboard.

use super::*;

impl<'a> App<'a> {
    // arboard::Clipboard is created on demand, not stored in App (it is not Send).

    /// Writes text to the system clipboard.
    pub(super) fn copy_to_clipboard(&self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clip) => {
                if let Err(e) = clip.set_text(text.to_string()) {
                    tracing::warn!(error = %e, "clipboard write failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
        }
    }

    /// Reads text from the system clipboard. Returns None on failure.
    pub(super) fn paste_from_clipboard(&self) -> Option<String> {
        let mut clip = arboard::Clipboard::new()
            .map_err(|e| tracing::warn!(error = %e, "clipboard unavailable"))
            .ok()?;
        clip.get_text()
            .map_err(|e| tracing::debug!(error = %e, "no text on clipboard"))
            .ok()
    }
}
