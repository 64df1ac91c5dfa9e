//! Local storage module
//!
//! This module handles persistent storage of the inbox:
//! - `backend` - Key-value backend trait with in-memory and file implementations
//! - `storage_db` - SQLite key-value backend
//! - `message` - Message structures, status and category
//! - `message_store` - The message collection persisted under one namespace key
//! - `shared` - Single-writer handle for sharing a store across tasks
//! - `settings` - Application settings and configuration

// Submodules
pub mod backend;
pub mod message;
pub mod message_store;
pub mod settings;
pub mod shared;
pub mod storage_db;

// Re-export commonly used types
pub use backend::{DynBackend, FileStore, KeyValueStore, MemoryStore};
pub use message::{Message, MessageCategory, MessageDraft, MessageStatus};
pub use message_store::{MessageStore, DEFAULT_NAMESPACE, SCHEMA_VERSION};
pub use settings::{BackendKind, Settings};
pub use shared::SharedMessageStore;
pub use storage_db::SqliteStore;
