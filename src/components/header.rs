use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

/// What the left side of the header shows.
pub enum HeaderLeft<'a> {
    Title(&'a str),
    /// Inline save prompt: label, buffer and cursor (char index).
    Prompt {
        label: &'a str,
        buf: &'a str,
        cursor: usize,
    },
}

pub fn render(frame: &mut Frame, area: Rect, left: HeaderLeft, wrap_percent: Option<u16>) {
    let left_spans = match left {
        HeaderLeft::Title(title) => vec![Span::styled(format!("  {}", title), theme::title_style())],
        HeaderLeft::Prompt { label, buf, cursor } => render_prompt_input(label, buf, cursor),
    };

    // Right side: wrap progress badge
    let right_spans: Vec<Span> = match wrap_percent {
        Some(pct) => vec![Span::styled(
            format!(" WRAPPING {:>3}% ", pct),
            Style::default()
                .fg(theme::WHITE)
                .bg(theme::BUSY)
                .add_modifier(Modifier::BOLD),
        )],
        None => Vec::new(),
    };

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(right_spans.iter().map(|s| s.width() as u16).sum()),
    ])
    .split(area);

    // Fill background
    let bg = Paragraph::new("").style(theme::header_style());
    frame.render_widget(bg, area);

    let left = Paragraph::new(Line::from(left_spans));
    frame.render_widget(left, chunks[0]);

    let right = Paragraph::new(Line::from(right_spans));
    frame.render_widget(right, chunks[1]);
}

fn render_prompt_input<'a>(label: &str, buf: &str, cursor: usize) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled(
        format!("  {} ", label),
        Style::default().fg(theme::KEY).bg(theme::BAR_BG),
    )];

    let chars: Vec<char> = buf.chars().collect();
    let cursor = cursor.min(chars.len());

    // Text before cursor
    let before: String = chars[..cursor].iter().collect();
    if !before.is_empty() {
        spans.push(Span::styled(
            before,
            Style::default().fg(theme::WHITE).bg(theme::BAR_BG),
        ));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars
        .get(cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    spans.push(Span::styled(
        cursor_char,
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
    ));

    // Text after cursor
    if cursor + 1 < chars.len() {
        let after: String = chars[cursor + 1..].iter().collect();
        spans.push(Span::styled(
            after,
            Style::default().fg(theme::WHITE).bg(theme::BAR_BG),
        ));
    }

    spans
}
