//! UI helper functions

use chrono::{DateTime, Utc};
use ratatui::style::Color;
use crate::storage::MessageCategory;

/// Badge color of a category
pub fn category_color(category: MessageCategory) -> Color {
    match category {
        MessageCategory::Inquiry => Color::Blue,
        MessageCategory::Viewing => Color::Green,
        MessageCategory::Info => Color::Magenta,
        MessageCategory::Offer => Color::Gray,
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Format the age of a timestamp in human-readable form
pub fn format_age(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now().signed_duration_since(timestamp);

    if age.num_days() > 0 {
        format!("{} days ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{} hours ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{} minutes ago", age.num_minutes())
    } else {
        "just now".to_string()
    }
}
