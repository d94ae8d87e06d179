pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod payload;
pub mod theme;
pub mod wrap;
