//! Main application state and logic

use crate::compose::{ComposeForm, MessageTemplate};
use crate::inbox::InboxView;
use crate::storage::{DynBackend, MessageStatus, MessageStore, Settings};
use crate::tui::types::{ComposeField, Screen};
use crate::{Error, Result};
use std::path::Path;

/// Main application state
pub struct App {
    /// Inbox message store
    pub store: MessageStore<DynBackend>,
    /// Inbox list/detail state
    pub inbox: InboxView,
    /// Current screen
    pub current_screen: Screen,
    /// Compose form
    pub compose: ComposeForm,
    /// Focused compose input
    pub compose_field: ComposeField,
    /// Status line text
    pub status_message: Option<String>,
    /// Whether app should quit
    pub should_quit: bool,
    /// Loaded settings
    pub settings: Settings,
}

impl App {
    /// Create app from a settings file (defaults when the file is missing)
    pub fn new_with_settings<P: AsRef<Path>>(settings_path: P) -> Result<Self> {
        let settings = Settings::load(settings_path)?;
        let store = settings.open_store()?;
        Ok(Self::with_store(store, settings))
    }

    /// Create app around an already opened store
    pub fn with_store(store: MessageStore<DynBackend>, settings: Settings) -> Self {
        let inbox = InboxView::load(&store);
        if let Err(e) = store.try_list() {
            tracing::warn!("Inbox opened on unreadable store: {}", e);
        }

        Self {
            store,
            inbox,
            current_screen: Screen::Inbox,
            compose: ComposeForm::new("", "", settings.sender_name.clone()),
            compose_field: ComposeField::PropertyId,
            status_message: None,
            should_quit: false,
            settings,
        }
    }

    // ========== Inbox ==========

    /// Move the inbox cursor down
    pub fn next(&mut self) {
        self.inbox.next();
    }

    /// Move the inbox cursor up
    pub fn previous(&mut self) {
        self.inbox.previous();
    }

    /// Open the highlighted message, marking it read
    pub fn open_selected(&mut self) {
        let result = self.inbox.open_selected(&mut self.store).map(|_| ());
        self.report(result, None);
    }

    /// Toggle read status of the selected message
    pub fn toggle_read(&mut self) {
        let result = self.inbox.toggle_read(&mut self.store);
        let message = match &result {
            Ok(Some(MessageStatus::Read)) => Some("Marked as read"),
            Ok(Some(MessageStatus::Unread)) => Some("Marked as unread"),
            _ => None,
        };
        self.report(result.map(|_| ()), message);
    }

    /// Delete the selected message
    pub fn delete_selected(&mut self) {
        let result = self.inbox.delete_selected(&mut self.store);
        let message = match &result {
            Ok(true) => Some("Message deleted"),
            _ => None,
        };
        self.report(result.map(|_| ()), message);
    }

    /// Re-read the store
    pub fn refresh(&mut self) {
        self.inbox.refresh(&self.store);
        self.status_message = match self.store.try_list() {
            Ok(_) => None,
            Err(e) => Some(format!("Inbox could not be read: {}", e)),
        };
    }

    /// Close the detail pane
    pub fn close_detail(&mut self) {
        self.inbox.clear_selection();
    }

    // ========== Compose ==========

    /// Switch to the compose screen with an empty form
    pub fn show_compose_screen(&mut self) {
        self.compose = ComposeForm::new("", "", self.settings.sender_name.clone());
        self.current_screen = Screen::Compose;
        self.compose_field = ComposeField::PropertyId;
        self.status_message = None;
    }

    /// Fill the compose form from a template
    pub fn apply_template(&mut self, template: MessageTemplate) {
        self.compose.apply_template(template);
        self.compose_field = ComposeField::Body;
    }

    /// Move focus to the next compose input
    pub fn next_field(&mut self) {
        self.compose_field = self.compose_field.next();
    }

    /// Append a character to the focused input
    pub fn input_char(&mut self, c: char) {
        self.focused_input().push(c);
    }

    /// Remove the last character of the focused input
    pub fn backspace(&mut self) {
        self.focused_input().pop();
    }

    /// Send the composed message and return to the inbox
    ///
    /// On failure the form keeps its inputs and the error is shown.
    pub fn send_compose(&mut self) {
        match self.compose.send(&mut self.store) {
            Ok(message) => {
                tracing::info!("Message {} sent about {}", message.id, message.property_id);
                self.inbox.refresh(&self.store);
                self.current_screen = Screen::Inbox;
                self.status_message = Some("Message sent!".to_string());
            }
            Err(e) => self.status_message = Some(error_text(&e)),
        }
    }

    /// Discard the compose form and return to the inbox
    pub fn cancel_compose(&mut self) {
        self.compose.reset();
        self.current_screen = Screen::Inbox;
        self.status_message = None;
    }

    fn focused_input(&mut self) -> &mut String {
        match self.compose_field {
            ComposeField::PropertyId => &mut self.compose.property_id,
            ComposeField::PropertyTitle => &mut self.compose.property_title,
            ComposeField::Subject => &mut self.compose.subject,
            ComposeField::Body => &mut self.compose.body,
        }
    }

    fn report(&mut self, result: Result<()>, success: Option<&str>) {
        match result {
            Ok(()) => self.status_message = success.map(str::to_string),
            Err(e) => {
                tracing::error!("Inbox operation failed: {}", e);
                self.inbox.refresh(&self.store);
                self.status_message = Some(error_text(&e));
            }
        }
    }
}

fn error_text(error: &Error) -> String {
    match error {
        Error::StorageUnavailable(_) => format!("{} (try again)", error),
        Error::Validation(reason) => reason.clone(),
        other => other.to_string(),
    }
}
