use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::theme;
use crate::wrap::TAB_WIDTH;

pub fn configure_textarea(textarea: &mut TextArea) {
    textarea.set_style(theme::editor_style());
    textarea.set_cursor_line_style(Style::default());

    // Cursor style
    textarea.set_cursor_style(
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
    );

    textarea.set_selection_style(Style::default().bg(theme::SELECTION));
    textarea.set_tab_length(TAB_WIDTH as u8);

    textarea.set_placeholder_text("Paste a Base64 string (Ctrl+V) ...");
    textarea.set_placeholder_style(theme::placeholder_style());
}

/// Builds a configured textarea holding `text`, one entry per line.
pub fn textarea_from(text: &str) -> TextArea<'static> {
    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.split('\n').map(String::from).collect()
    };
    let mut textarea = TextArea::new(lines);
    configure_textarea(&mut textarea);
    textarea
}
