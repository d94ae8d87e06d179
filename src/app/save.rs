//! Save flow: decode the buffer, ask for a destination, write the file.

use super::*;

impl<'a> App<'a> {
    /// Ctrl+S. Decodes and classifies the buffer; on success opens the save
    /// prompt, otherwise reports why nothing can be saved.
    pub(super) fn begin_save(&mut self) {
        // Sliced and synchronous wraps agree, so just finish it
        if self.is_busy() {
            self.finish_wrap();
        }

        match Payload::from_text(&self.textarea_content()) {
            Ok(payload) => {
                tracing::info!(kind = payload.format.label(), bytes = payload.bytes.len(), "payload ready");
                self.save_prompt = Some(SavePrompt::new(payload, &self.settings.output_dir));
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Enter in the save prompt. An empty path aborts quietly.
    pub(super) fn confirm_save(&mut self) {
        let Some(prompt) = self.save_prompt.take() else {
            return;
        };
        let cwd = std::env::current_dir().unwrap_or_else(|_| self.settings.output_dir.clone());
        let Some(path) = prompt.payload.resolve_path(&prompt.buf, &cwd) else {
            self.set_status("Save cancelled");
            return;
        };

        match prompt.payload.write_to(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved");
                self.set_status("Saved");
                self.notify(
                    NoticeLevel::Success,
                    "Saved",
                    &format!("File saved to:\n{}", path.display()),
                );
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Esc in the save prompt.
    pub(super) fn cancel_save(&mut self) {
        self.save_prompt = None;
        self.set_status("Save cancelled");
    }

    fn report_error(&mut self, err: &ConvertError) {
        let (level, title) = match err {
            ConvertError::EmptyInput => (NoticeLevel::Warning, "No input"),
            ConvertError::Decode(_) => (NoticeLevel::Error, "Decode failed"),
            ConvertError::UnsupportedFormat => (NoticeLevel::Error, "Unrecognized format"),
            ConvertError::Io { .. } => (NoticeLevel::Error, "Write failed"),
        };
        if err.is_warning() {
            tracing::info!("{}", err);
        } else {
            tracing::warn!(error = %err, "save failed");
        }
        self.notify(level, title, &err.to_string());
    }
}
