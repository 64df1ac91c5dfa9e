//! Inbox list/detail view state
//!
//! The view keeps a transient copy of the store's messages. It never shares
//! state with the store: after every mutating call it re-reads the collection,
//! so what is displayed is always what is persisted.

use crate::{
    storage::{KeyValueStore, Message, MessageStatus, MessageStore},
    Result,
};

/// List/detail state of the inbox screen
#[derive(Debug, Clone, Default)]
pub struct InboxView {
    messages: Vec<Message>,
    cursor: usize,
    selected_id: Option<String>,
}

impl InboxView {
    /// Create a view populated from the store
    pub fn load<B: KeyValueStore>(store: &MessageStore<B>) -> Self {
        let mut view = Self::default();
        view.refresh(store);
        view
    }

    /// Re-read the store, keeping the cursor in range and dropping a
    /// selection whose message no longer exists
    pub fn refresh<B: KeyValueStore>(&mut self, store: &MessageStore<B>) {
        self.messages = store.list();

        if let Some(id) = &self.selected_id {
            if !self.messages.iter().any(|m| &m.id == id) {
                self.selected_id = None;
            }
        }
        self.clamp_cursor();
    }

    /// Messages as last read from the store
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the inbox is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of unread messages
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_unread()).count()
    }

    /// Index of the highlighted row
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Message under the cursor
    pub fn highlighted(&self) -> Option<&Message> {
        self.messages.get(self.cursor)
    }

    /// Message shown in the detail pane
    pub fn selected_message(&self) -> Option<&Message> {
        let id = self.selected_id.as_ref()?;
        self.messages.iter().find(|m| &m.id == id)
    }

    /// Move the cursor down, wrapping around
    pub fn next(&mut self) {
        if !self.messages.is_empty() {
            self.cursor = (self.cursor + 1) % self.messages.len();
        }
    }

    /// Move the cursor up, wrapping around
    pub fn previous(&mut self) {
        if !self.messages.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.messages.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Show the highlighted message and mark it read if it was unread
    pub fn open_selected<B: KeyValueStore>(
        &mut self,
        store: &mut MessageStore<B>,
    ) -> Result<Option<&Message>> {
        let Some(message) = self.messages.get(self.cursor) else {
            return Ok(None);
        };
        let id = message.id.clone();
        let was_unread = message.is_unread();

        self.selected_id = Some(id.clone());
        if was_unread {
            store.update_status(&id, MessageStatus::Read)?;
            self.refresh(store);
        }

        Ok(self.selected_message())
    }

    /// Flip read status of the selected message, or the highlighted one when
    /// nothing is selected
    pub fn toggle_read<B: KeyValueStore>(
        &mut self,
        store: &mut MessageStore<B>,
    ) -> Result<Option<MessageStatus>> {
        let Some(id) = self.target_id() else {
            return Ok(None);
        };

        let status = store.toggle_status(&id)?;
        self.refresh(store);
        Ok(status)
    }

    /// Delete the selected message, or the highlighted one when nothing is
    /// selected
    pub fn delete_selected<B: KeyValueStore>(
        &mut self,
        store: &mut MessageStore<B>,
    ) -> Result<bool> {
        let Some(id) = self.target_id() else {
            return Ok(false);
        };

        let deleted = store.delete(&id)?;
        if self.selected_id.as_deref() == Some(id.as_str()) {
            self.selected_id = None;
        }
        self.refresh(store);
        Ok(deleted)
    }

    /// Close the detail pane
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    fn target_id(&self) -> Option<String> {
        self.selected_id
            .clone()
            .or_else(|| self.highlighted().map(|m| m.id.clone()))
    }

    fn clamp_cursor(&mut self) {
        if self.messages.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.messages.len() {
            self.cursor = self.messages.len() - 1;
        }
    }
}
