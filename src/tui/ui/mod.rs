//! UI rendering module - screen-specific rendering functions
//!
//! Each screen has its own file.

mod compose;
mod helpers;
mod inbox;

use ratatui::Frame;
use crate::tui::types::Screen;
use crate::tui::app::App;

pub use compose::render_compose;
pub use inbox::render_inbox;

pub use helpers::{category_color, format_age, truncate};

/// Main UI rendering function - dispatches to screen-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Inbox => render_inbox(f, app),
        Screen::Compose => render_compose(f, app),
    }
}
