//! Core types for TUI screens and navigation

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Inbox list with detail pane
    Inbox,
    /// Compose a message about a property
    Compose,
}

/// Focused input of the compose screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    /// Property id input
    PropertyId,
    /// Property title input
    PropertyTitle,
    /// Subject input
    Subject,
    /// Message input
    Body,
}

impl ComposeField {
    /// Get all fields in tab order
    pub fn all() -> [Self; 4] {
        [Self::PropertyId, Self::PropertyTitle, Self::Subject, Self::Body]
    }

    /// Next field in tab order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::PropertyId => Self::PropertyTitle,
            Self::PropertyTitle => Self::Subject,
            Self::Subject => Self::Body,
            Self::Body => Self::PropertyId,
        }
    }

    /// Get display label for the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::PropertyId => "Property ID",
            Self::PropertyTitle => "Property",
            Self::Subject => "Subject",
            Self::Body => "Message",
        }
    }
}
