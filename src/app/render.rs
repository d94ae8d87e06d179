//! UI rendering: main frame layout, editor view, help and notice overlays.

use super::*;

/// Centers a `width` x `height` box inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn key_line<'l>(keys: &'l str, action: &'l str) -> Line<'l> {
    Line::from(vec![
        Span::styled(format!("  {:<17}", keys), Style::default().fg(theme::KEY)),
        Span::raw(action),
    ])
}

impl<'a> App<'a> {
    /// Runs one frame of the main loop: draw + tick.
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();

        // Fill entire frame background first (covers margins outside capped area)
        let bg = Paragraph::new("").style(theme::editor_style());
        frame.render_widget(bg, full);

        // Cap width and center horizontally
        let capped_width = full.width.min(MAX_WIDTH);
        let x_offset = (full.width - capped_width) / 2;
        let usable_area = Rect::new(x_offset, full.y, capped_width, full.height);

        let chunks = Layout::vertical([
            Constraint::Length(1),  // Header
            Constraint::Length(1),  // Divider
            Constraint::Min(1),    // Content
            Constraint::Length(1),  // Divider
            Constraint::Length(1),  // Status
        ])
        .split(usable_area);

        self.content_area = chunks[2];

        // Reflow the paste if the width budget changed
        let budget = self.wrap_budget();
        if self.content_area.width > 0 && self.wrapped_for != Some(budget) {
            self.reflow(budget);
        }

        // Header bar: title (or save prompt) + wrap progress
        let left = match self.save_prompt.as_ref() {
            Some(prompt) => header::HeaderLeft::Prompt {
                label: &prompt.label,
                buf: &prompt.buf,
                cursor: prompt.cursor,
            },
            None => header::HeaderLeft::Title(TITLE),
        };
        header::render(frame, chunks[0], left, self.wrap_percent());

        // Thin dividers between bars and content
        let divider_style = Style::default().fg(theme::BORDER);
        let top_divider = Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
            .style(divider_style);
        frame.render_widget(top_divider, chunks[1]);
        let bottom_divider = Paragraph::new("\u{2500}".repeat(chunks[3].width as usize))
            .style(divider_style);
        frame.render_widget(bottom_divider, chunks[3]);

        self.render_editor(frame, chunks[2]);

        // Status bar: cursor position and buffer size
        let (line, col) = self.textarea.cursor();
        let lines = self.textarea.lines();
        status::render(
            frame,
            chunks[4],
            status::StatusInfo {
                line: line + 1,
                col,
                message: &self.status_message,
                char_count: lines.iter().map(|l| l.chars().count()).sum(),
                line_count: lines.len(),
                wrap_width: self
                    .wrapped_for
                    .filter(|_| self.raw_source.is_some() && !self.modified && !self.is_busy()),
            },
        );

        // Overlays last so they sit on top of everything
        if self.show_help {
            self.render_help(frame);
        }
        if let Some(notice) = self.notice.as_ref() {
            render_notice(frame, notice);
        }
    }

    /// Renders a centered modal overlay listing all keybindings.
    /// Dismissed by pressing any key.
    fn render_help(&self, frame: &mut Frame) {
        let help_area = centered(frame.area(), 45, 17);
        frame.render_widget(Clear, help_area);

        // Must match the actual keybinding handlers
        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default()
                    .fg(theme::TITLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key_line("Ctrl+V", "Paste Base64 text"),
            key_line("Ctrl+S", "Save as PNG / PDF"),
            key_line("Ctrl+L", "Clear"),
            key_line("Ctrl+Q", "Quit"),
            key_line("F1", "This help"),
            Line::from(""),
            key_line("Ctrl+Z / Ctrl+Y", "Undo / Redo"),
            key_line("Ctrl+A", "Select all"),
            key_line("Ctrl+C", "Copy (system)"),
            Line::from(""),
            key_line("Enter", "Save prompt: write file"),
            key_line("Esc", "Save prompt: cancel"),
            key_line("Ctrl+U", "Save prompt: clear path"),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, help_area);
    }

    /// Renders the tui-textarea widget plus tilde markers for empty lines.
    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);

        let total_lines = self.textarea.lines().len();
        let (cursor_row, _) = self.textarea.cursor();
        // Rows below the last buffer line, assuming the cursor keeps the end in view
        let top = (cursor_row + 1).saturating_sub(area.height as usize);
        let visible_content_lines =
            total_lines.saturating_sub(top).min(area.height as usize) as u16;
        for row in visible_content_lines..area.height {
            let tilde_area = Rect {
                x: area.x,
                y: area.y + row,
                width: area.width,
                height: 1,
            };
            let tilde = Paragraph::new(Span::styled("~", Style::default().fg(theme::TILDE)));
            frame.render_widget(tilde, tilde_area);
        }
    }
}

/// Renders a notice box with a colored border matching its level.
fn render_notice(frame: &mut Frame, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Success => theme::SUCCESS,
        NoticeLevel::Warning => theme::WARNING,
        NoticeLevel::Error => theme::ERROR,
    };

    let mut text: Vec<Line> = notice.body.lines().map(Line::from).collect();
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key",
        Style::default().fg(theme::TILDE),
    )));

    let longest = text.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (longest + 4).clamp(30, 70);
    // Borders plus wrapped body lines
    let inner = width.saturating_sub(2).max(1);
    let body_rows: u16 = text
        .iter()
        .map(|l| (l.width() as u16).div_ceil(inner).max(1))
        .sum();
    let area = centered(frame.area(), width, body_rows + 2);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", notice.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
