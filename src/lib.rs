//! HomeLease Inbox - property inquiry messaging
//!
//! This library provides the landlord-messaging inbox of the HomeLease rental
//! marketplace: a message store persisted under a single key of a local
//! key-value backend, templated message composition, and the list/detail
//! inbox view that drives it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compose;
pub mod inbox;
pub mod storage;
pub mod tui;

#[cfg(test)]
mod tests;

/// Result type alias for inbox operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for inbox operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The key-value backend could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted data exists but cannot be decoded
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    /// Persisted data was written by a newer schema
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u32),

    /// User input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Initialize the library with logging
pub fn init() {
    tracing_subscriber::fmt::init();
}
