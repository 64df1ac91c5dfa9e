//! TUI (Terminal User Interface) module
//!
//! This module contains all TUI logic separated from the binary for better testability.

pub mod app;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use types::{ComposeField, Screen};
