pub mod app;
pub mod commands;
pub mod keys;
pub mod theme;
pub mod ui;

pub use app::{Action, App, ViewMode};
pub use theme::{DarkModeProbe, Palette, SystemProbe, ThemeManager};
