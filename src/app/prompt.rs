//! Inline save-path prompt: edit and confirm/cancel the destination.
//!
//! Opened by Ctrl+S once the buffer decodes to a PNG or PDF. The buffer is
//! pre-filled with the suggested `base64.<ext>` path.

use super::*;

impl SavePrompt {
    pub fn new(payload: Payload, output_dir: &Path) -> Self {
        let buf = payload.default_path(output_dir).display().to_string();
        let label = format!("Save {}:", payload.format.filter_label());
        Self {
            cursor: buf.chars().count(),
            buf,
            label,
            payload,
        }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buf
            .char_indices()
            .nth(cursor)
            .map_or(self.buf.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.buf.insert(at, ch);
        self.cursor += 1;
    }

    /// Inserts pasted text, dropping line breaks.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            if ch != '\n' && ch != '\r' {
                self.insert_char(ch);
            }
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.buf.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.buf.remove(at);
        }
    }
}

impl<'a> App<'a> {
    /// Handles keypresses while the save prompt is open.
    /// Enter confirms, Esc cancels, printable chars edit the path.
    pub(super) fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.cancel_save();
                return;
            }
            KeyCode::Enter => {
                self.confirm_save();
                return;
            }
            _ => {}
        }

        let Some(prompt) = self.save_prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Delete => prompt.delete(),
            KeyCode::Left => {
                prompt.cursor = prompt.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if prompt.cursor < prompt.len() {
                    prompt.cursor += 1;
                }
            }
            KeyCode::Home => {
                prompt.cursor = 0;
            }
            KeyCode::End => {
                prompt.cursor = prompt.len();
            }
            // Ctrl+U clears the path, as in most shells
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.buf.clear();
                prompt.cursor = 0;
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.insert_char(ch);
            }
            _ => {}
        }
    }
}
