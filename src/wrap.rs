//! Width-aware hard wrapping for pasted Base64 text.
//!
//! Long Base64 strings arrive from the clipboard as a single line. They are
//! re-flowed into lines that fit the editor so nothing scrolls horizontally.
//! Wrapping only ever inserts `\n`; stripping those again yields the input.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

/// Every character that can appear in standard Base64 text.
pub const BASE64_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Cells a tab may occupy in the editor; the textarea uses the same length.
pub const TAB_WIDTH: usize = 4;

/// Measures the rendered width of a single glyph.
pub trait GlyphMetrics {
    fn glyph_width(&self, ch: char) -> usize;
}

/// Terminal cell widths. A tab counts as a full tab stop, other control
/// characters take no space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl GlyphMetrics for CellMetrics {
    fn glyph_width(&self, ch: char) -> usize {
        match ch {
            '\t' => TAB_WIDTH,
            _ => ch.width().unwrap_or(0),
        }
    }
}

/// Precomputed widths for the Base64 alphabet.
///
/// Characters outside the alphabet are measured live through the underlying
/// metrics, so arbitrary pasted text still wraps correctly, just slower.
pub struct GlyphTable<M> {
    widths: HashMap<char, usize>,
    metrics: M,
}

impl<M: GlyphMetrics> GlyphTable<M> {
    pub fn base64(metrics: M) -> Self {
        let widths = BASE64_ALPHABET
            .chars()
            .map(|ch| (ch, metrics.glyph_width(ch)))
            .collect();
        Self { widths, metrics }
    }

    /// Width of `ch`, plus whether it had to be measured outside the table.
    fn lookup(&self, ch: char) -> (usize, bool) {
        match self.widths.get(&ch) {
            Some(&w) => (w, false),
            None => (self.metrics.glyph_width(ch), true),
        }
    }

    pub fn width(&self, ch: char) -> usize {
        self.lookup(ch).0
    }
}

/// Wraps a single line (no `\n`) so that no produced line exceeds `budget`.
pub fn wrap_line<M: GlyphMetrics>(line: &str, budget: usize, table: &GlyphTable<M>) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / budget.max(1));
    let mut cursor = LineCursor::default();
    for ch in line.chars() {
        cursor.push(&mut out, ch, table.width(ch), budget);
    }
    out
}

/// Wraps multi-line text. Embedded newlines are hard boundaries and each
/// original line is wrapped independently.
pub fn wrap_text<M: GlyphMetrics>(text: &str, budget: usize, table: &GlyphTable<M>) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split('\n')
        .map(|line| wrap_line(line, budget, table))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Running state of the line currently being filled.
#[derive(Debug, Default)]
struct LineCursor {
    width: usize,
    occupied: bool,
}

impl LineCursor {
    fn push(&mut self, out: &mut String, ch: char, w: usize, budget: usize) {
        // A character that does not fit starts the next line. An empty line
        // always takes the character, even one wider than the whole budget.
        if self.occupied && self.width + w > budget {
            out.push('\n');
            self.width = 0;
        }
        out.push(ch);
        self.width += w;
        self.occupied = true;
    }

    fn hard_break(&mut self, out: &mut String) {
        out.push('\n');
        self.width = 0;
        self.occupied = false;
    }
}

/// Result of advancing a [`WrapJob`] by one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStep {
    Pending { done: usize, total: usize },
    Complete,
}

impl WrapStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, WrapStep::Complete)
    }
}

/// Resumable wrap of a whole text, advanced a slice at a time from the
/// event loop so the UI can repaint between slices.
///
/// Produces exactly what [`wrap_text`] produces for the same input.
pub struct WrapJob<M> {
    chars: Vec<char>,
    pos: usize,
    budget: usize,
    table: GlyphTable<M>,
    cursor: LineCursor,
    out: String,
    fallbacks: usize,
}

impl<M: GlyphMetrics> WrapJob<M> {
    pub fn new(text: &str, budget: usize, table: GlyphTable<M>) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            out: String::with_capacity(text.len() + text.len() / budget.max(1)),
            chars,
            pos: 0,
            budget,
            table,
            cursor: LineCursor::default(),
            fallbacks: 0,
        }
    }

    /// Processes at most `max_chars` characters. A zero slice still makes
    /// progress by one character.
    pub fn step(&mut self, max_chars: usize) -> WrapStep {
        let end = (self.pos + max_chars.max(1)).min(self.chars.len());
        for i in self.pos..end {
            let ch = self.chars[i];
            if ch == '\n' {
                self.cursor.hard_break(&mut self.out);
                continue;
            }
            let (w, fallback) = self.table.lookup(ch);
            if fallback {
                self.fallbacks += 1;
            }
            self.cursor.push(&mut self.out, ch, w, self.budget);
        }
        self.pos = end;

        if self.is_complete() {
            WrapStep::Complete
        } else {
            WrapStep::Pending {
                done: self.pos,
                total: self.chars.len(),
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Completion in whole percent, for the header indicator.
    pub fn percent(&self) -> u16 {
        if self.chars.is_empty() {
            return 100;
        }
        (self.pos * 100 / self.chars.len()) as u16
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Characters that were measured outside the glyph table so far.
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    /// Runs any remaining slices and returns the wrapped text.
    pub fn finish(mut self) -> String {
        while !self.is_complete() {
            self.step(self.chars.len());
        }
        self.out
    }
}
