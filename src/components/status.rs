use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

pub struct StatusInfo<'a> {
    pub line: usize,
    pub col: usize,
    pub message: &'a str,
    /// Characters in the buffer, line breaks excluded.
    pub char_count: usize,
    pub line_count: usize,
    /// Budget the buffer is wrapped to; `None` once it has been edited.
    pub wrap_width: Option<usize>,
}

pub fn render(frame: &mut Frame, area: Rect, info: StatusInfo) {
    let bg = Paragraph::new("").style(theme::status_style());
    frame.render_widget(bg, area);

    let left = Line::from(Span::styled(
        format!("  Ln {}, Col {}", info.line, info.col),
        theme::status_style(),
    ));

    let mut right = Vec::new();
    if let Some(width) = info.wrap_width {
        right.push(Span::styled(
            format!("{} cols", width),
            Style::default().fg(theme::KEY),
        ));
        right.push(Span::raw(" | "));
    }
    right.push(Span::styled(
        format!("{} chars | {} lines  ", info.char_count, info.line_count),
        theme::status_style(),
    ));
    let right = Line::from(right);

    let chunks = Layout::horizontal([
        Constraint::Length(left.width() as u16),
        Constraint::Fill(1),
        Constraint::Length(right.width() as u16),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(left), chunks[0]);

    // Transient message centered in whatever room is left
    if !info.message.is_empty() {
        let center = Paragraph::new(Span::styled(info.message, theme::status_style()))
            .alignment(Alignment::Center);
        frame.render_widget(center, chunks[1]);
    }

    frame.render_widget(Paragraph::new(right), chunks[2]);
}
