use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use tui_textarea::{Input, TextArea};

use crate::components::{editor, header, status};
use crate::config::Settings;
use crate::error::ConvertError;
use crate::payload::Payload;
use crate::theme;
use crate::wrap::{CellMetrics, GlyphTable, WrapJob};

/// How long status bar messages stay visible before auto-clearing.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Characters wrapped per tick while a wrap job is pending.
pub const WRAP_SLICE: usize = 4096;

/// Maximum width for the UI content area. Wider terminals get centered, capped layout.
const MAX_WIDTH: u16 = 120;

const TITLE: &str = "Base64 to file";

/// Severity of a modal notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A modal message box; any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

/// State of one save operation, from the decoded payload to the chosen path.
#[derive(Debug, Clone)]
pub struct SavePrompt {
    pub payload: Payload,
    pub label: String,
    pub buf: String,
    /// Cursor position in chars.
    pub cursor: usize,
}

pub struct App<'a> {
    // --- Core state ---
    pub textarea: TextArea<'a>,
    pub settings: Settings,
    pub should_quit: bool,
    /// True when the buffer differs from the last wrap result.
    pub modified: bool,

    // --- Wrapping ---
    /// Most recent paste, line endings normalized, before wrapping.
    raw_source: Option<String>,
    /// Buffer text as produced by the last wrap; used for modification detection.
    wrapped_snapshot: String,
    wrap_job: Option<WrapJob<CellMetrics>>,
    /// Budget the current buffer was wrapped for, so resizes can reflow.
    wrapped_for: Option<usize>,

    // --- Save flow ---
    pub save_prompt: Option<SavePrompt>,
    pub notice: Option<Notice>,

    // --- Status bar ---
    pub status_message: String,
    pub status_time: Option<Instant>,

    // --- Help modal (F1) ---
    pub show_help: bool,

    /// Cached content area rect from last render.
    content_area: Rect,
}

/// Terminals report pasted line breaks as `\r` or `\r\n`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl<'a> App<'a> {
    pub fn new(settings: Settings) -> Self {
        // Wrapping a preloaded input is deferred to the first render() call
        // where the content area width is known.
        let raw_source = settings
            .initial_text
            .as_deref()
            .map(normalize_line_endings);
        let shown = raw_source.clone().unwrap_or_default();

        Self {
            textarea: editor::textarea_from(&shown),
            settings,
            should_quit: false,
            modified: false,
            raw_source,
            wrapped_snapshot: shown,
            wrap_job: None,
            wrapped_for: None,
            save_prompt: None,
            notice: None,
            status_message: "F1: help | Ctrl+S: save | Ctrl+Q: quit".to_string(),
            status_time: Some(Instant::now()),
            show_help: false,
            content_area: Rect::default(),
        }
    }

    /// Returns the full buffer as a single string.
    pub fn textarea_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// True while a wrap job still has slices to run.
    pub fn is_busy(&self) -> bool {
        self.wrap_job.is_some()
    }

    /// Progress of the pending wrap, if any.
    pub fn wrap_percent(&self) -> Option<u16> {
        self.wrap_job.as_ref().map(|job| job.percent())
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called once per frame from the main loop. Advances a pending wrap by
    /// one slice and expires status messages.
    pub fn tick(&mut self) {
        let complete = match self.wrap_job.as_mut() {
            Some(job) => job.step(WRAP_SLICE).is_complete(),
            None => false,
        };
        if complete {
            self.finish_wrap();
        }

        // Auto-clear status messages after STATUS_DURATION
        if let Some(time) = self.status_time {
            if time.elapsed() >= STATUS_DURATION {
                self.status_message.clear();
                self.status_time = None;
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Dispatches to key or paste handlers.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            // Bracketed paste: terminal sends entire clipboard as one event
            // (enabled via EnableBracketedPaste in main.rs)
            Event::Paste(text) => self.handle_paste(text),
            Event::Resize(_, _) => {} // render() reflows on width change
            _ => {}
        }
    }

    /// Shows a temporary message in the status bar.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = Some(Instant::now());
    }

    /// Opens a modal notice.
    pub fn notify(&mut self, level: NoticeLevel, title: &str, body: &str) {
        self.notice = Some(Notice {
            level,
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn update_modified(&mut self) {
        self.modified = self.textarea_content() != self.wrapped_snapshot;
    }

    // ─── Wrapping ────────────────────────────────────────────────────────

    /// Width available for text: content width minus the configured margin.
    pub fn wrap_budget(&self) -> usize {
        self.content_area.width.saturating_sub(self.settings.margin) as usize
    }

    /// Replaces the buffer with freshly pasted text and schedules its wrap.
    /// The raw text stays visible until the wrap completes.
    fn load_raw(&mut self, raw: String) {
        self.textarea = editor::textarea_from(&raw);
        self.wrapped_snapshot = raw.clone();
        self.modified = false;
        self.raw_source = Some(raw);
        self.wrap_job = None;
        self.wrapped_for = None;
        if self.content_area.width > 0 {
            self.reflow(self.wrap_budget());
        }
    }

    /// Starts wrapping the raw source for `budget` unless the user has edited
    /// the buffer since the last wrap.
    fn reflow(&mut self, budget: usize) {
        self.wrapped_for = Some(budget);
        if self.modified {
            return;
        }
        let Some(raw) = self.raw_source.as_deref() else {
            return;
        };
        tracing::debug!(budget, chars = raw.len(), "starting wrap");
        self.wrap_job = Some(WrapJob::new(raw, budget, GlyphTable::base64(CellMetrics)));
    }

    /// Runs the pending wrap to the end and installs the result.
    pub fn finish_wrap(&mut self) {
        let Some(job) = self.wrap_job.take() else {
            return;
        };
        let budget = job.budget();
        let fallbacks = job.fallback_count();
        let wrapped = job.finish();
        if fallbacks > 0 {
            tracing::debug!(fallbacks, "measured characters outside the Base64 alphabet");
        }
        tracing::debug!(budget, lines = wrapped.split('\n').count(), "wrap complete");

        let (row, col) = self.textarea.cursor();
        self.textarea = editor::textarea_from(&wrapped);
        self.wrapped_snapshot = wrapped;
        self.modified = false;
        // Restore cursor position (clamped to new bounds)
        let max_row = self.textarea.lines().len().saturating_sub(1);
        let row = row.min(max_row);
        let max_col = self.textarea.lines().get(row).map_or(0, |l| l.chars().count());
        let col = u16::try_from(col.min(max_col)).unwrap_or(u16::MAX);
        // Jump addresses rows as u16; step down for anything past that
        let jump_row = u16::try_from(row).unwrap_or(u16::MAX);
        self.textarea
            .move_cursor(tui_textarea::CursorMove::Jump(jump_row, col));
        for _ in jump_row as usize..row {
            self.textarea.move_cursor(tui_textarea::CursorMove::Down);
        }
    }

    /// Empties the buffer and forgets the last paste.
    fn clear_buffer(&mut self) {
        self.textarea = editor::textarea_from("");
        self.wrapped_snapshot.clear();
        self.raw_source = None;
        self.wrap_job = None;
        self.modified = false;
        self.set_status("Cleared");
    }
}

mod clipboard;
mod input;
mod prompt;
mod render;
mod save;
