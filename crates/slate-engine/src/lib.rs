pub mod io;
pub mod models;
pub mod navigation;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::*;
pub use navigation::{DEFAULT_HISTORY_CAPACITY, History, Navigator};
pub use parsing::parse_str;
pub use render::{LayoutConfig, SlideRenderer, display_view};
