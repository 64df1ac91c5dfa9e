//! Single-writer handle for sharing one message store across tasks

use crate::{
    storage::{
        backend::KeyValueStore,
        message::{Message, MessageDraft, MessageStatus},
        message_store::MessageStore,
    },
    Result,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle that serializes every operation on a [`MessageStore`]
///
/// Each call holds the lock for the whole read-modify-write, so concurrent
/// tasks never interleave two rewrites of the collection.
///
/// # Example
/// ```rust,no_run
/// use homelease_inbox::storage::{MemoryStore, MessageStore, SharedMessageStore};
///
/// # async fn example() -> homelease_inbox::Result<()> {
/// let shared = SharedMessageStore::new(MessageStore::with_default_namespace(MemoryStore::new()));
///
/// let ui_handle = shared.clone();
/// tokio::spawn(async move {
///     println!("{} unread", ui_handle.unread_count().await);
/// });
/// # Ok(())
/// # }
/// ```
pub struct SharedMessageStore<B: KeyValueStore> {
    inner: Arc<Mutex<MessageStore<B>>>,
}

impl<B: KeyValueStore> Clone for SharedMessageStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: KeyValueStore> SharedMessageStore<B> {
    /// Wrap a store
    pub fn new(store: MessageStore<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`MessageStore::list`]
    pub async fn list(&self) -> Vec<Message> {
        let store = self.inner.lock().await;
        store.list()
    }

    /// See [`MessageStore::try_list`]
    pub async fn try_list(&self) -> Result<Vec<Message>> {
        let store = self.inner.lock().await;
        store.try_list()
    }

    /// See [`MessageStore::unread_count`]
    pub async fn unread_count(&self) -> usize {
        let store = self.inner.lock().await;
        store.unread_count()
    }

    /// See [`MessageStore::create`]
    pub async fn create(&self, draft: MessageDraft) -> Result<Message> {
        let mut store = self.inner.lock().await;
        store.create(draft)
    }

    /// See [`MessageStore::update_status`]
    pub async fn update_status(&self, id: &str, status: MessageStatus) -> Result<bool> {
        let mut store = self.inner.lock().await;
        store.update_status(id, status)
    }

    /// See [`MessageStore::toggle_status`]
    pub async fn toggle_status(&self, id: &str) -> Result<Option<MessageStatus>> {
        let mut store = self.inner.lock().await;
        store.toggle_status(id)
    }

    /// See [`MessageStore::delete`]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut store = self.inner.lock().await;
        store.delete(id)
    }

    /// Run several operations under one lock acquisition
    pub async fn with_store<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut MessageStore<B>) -> T,
    {
        let mut store = self.inner.lock().await;
        f(&mut store)
    }
}
