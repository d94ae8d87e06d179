//! Input handling: keyboard events and the paste handler.

use super::*;

impl<'a> App<'a> {
    /// Paste handler invoked by the host loop with raw clipboard text.
    ///
    /// While the save prompt is open the text goes into the path buffer.
    /// Otherwise it replaces the editor buffer and is wrapped to fit.
    pub fn handle_paste(&mut self, text: String) {
        if let Some(prompt) = self.save_prompt.as_mut() {
            prompt.insert_str(&text);
            return;
        }
        if self.notice.is_some() || self.show_help {
            return;
        }
        if text.is_empty() {
            return;
        }
        tracing::info!(bytes = text.len(), "paste received");
        self.load_raw(normalize_line_endings(&text));
    }

    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. Processes modal states first, then global
    /// keybindings, then editor keys.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        // Notices and the help modal swallow the keypress that dismisses them
        if self.notice.is_some() {
            self.notice = None;
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Save prompt: all keys go to the inline path input
        if self.save_prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.should_quit = true;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.begin_save();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                match self.paste_from_clipboard() {
                    Some(text) => self.handle_paste(text),
                    None => self.set_status("Clipboard has no text"),
                }
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => {
                self.clear_buffer();
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        // The buffer is about to be replaced; edits would be lost
        if self.is_busy() {
            self.set_status("Wrapping pasted text...");
            return;
        }

        self.handle_editor_key(key);
    }

    /// Editor key handler. Intercepts standard keybindings BEFORE passing to
    /// tui-textarea, which has non-standard defaults:
    ///   tui-textarea: Ctrl+U=undo, Ctrl+R=redo, Ctrl+A=line-start
    ///   We remap:     Ctrl+Z=undo, Ctrl+Y=redo, Ctrl+A=select-all
    fn handle_editor_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            // Undo
            (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
                self.textarea.undo();
                self.update_modified();
                return;
            }
            // Redo
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                self.textarea.redo();
                self.update_modified();
                return;
            }
            // Select all (overrides tui-textarea's Ctrl+A = move to line start)
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.textarea.select_all();
                return;
            }
            // Copy selection to system clipboard (overrides tui-textarea's internal-only yank)
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.textarea.copy();
                let text = self.textarea.yank_text();
                if !text.is_empty() {
                    self.copy_to_clipboard(&text);
                }
                return;
            }
            _ => {}
        }

        // Everything else: pass through to tui-textarea's built-in handling.
        let input = Input::from(key);
        self.textarea.input(input);
        self.update_modified();
    }
}
