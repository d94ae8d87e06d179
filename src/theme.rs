use ratatui::style::{Color, Modifier, Style};

// Base colors: Color::Reset inherits terminal defaults
pub const FG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;

// UI elements
pub const BAR_BG: Color = Color::Reset;
pub const SELECTION: Color = Color::Blue;
pub const PLACEHOLDER: Color = Color::DarkGray;
pub const TITLE: Color = Color::Rgb(130, 170, 255);
pub const KEY: Color = Color::Cyan;

// Notice levels
pub const SUCCESS: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;

// White for text on colored backgrounds
pub const WHITE: Color = Color::White;

// Tilde color for empty lines beyond the buffer
pub const TILDE: Color = Color::DarkGray;

// Progress badge while a wrap is running
pub const BUSY: Color = Color::Blue;

pub fn editor_style() -> Style {
    Style::default()
}

pub fn header_style() -> Style {
    Style::default()
}

pub fn status_style() -> Style {
    Style::default()
}

pub fn title_style() -> Style {
    Style::default().fg(TITLE).add_modifier(Modifier::BOLD)
}

pub fn placeholder_style() -> Style {
    Style::default().fg(PLACEHOLDER)
}
