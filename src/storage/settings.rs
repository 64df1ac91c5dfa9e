//! Application settings and configuration

use crate::{
    storage::{
        backend::{DynBackend, FileStore, MemoryStore},
        message_store::{MessageStore, DEFAULT_NAMESPACE},
        storage_db::SqliteStore,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which key-value backend holds the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Nothing survives the process
    Memory,
    /// One JSON file per namespace inside `data_path`
    #[default]
    File,
    /// SQLite database at `data_path/inbox.db`
    Sqlite,
}

/// Application settings
///
/// Settings are stored in JSON format and can be loaded/saved from disk.
///
/// # Example
/// ```rust,no_run
/// use homelease_inbox::storage::Settings;
///
/// // Load settings (returns default if file doesn't exist)
/// let settings = Settings::load("settings.json").expect("Failed to load");
///
/// let store = settings.open_store().expect("Failed to open store");
/// println!("{} messages", store.list().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend holding the inbox
    pub backend: BackendKind,
    /// Directory for the file and SQLite backends
    pub data_path: String,
    /// Key the inbox is stored under
    pub namespace: String,
    /// Sender name stamped on composed messages
    pub sender_name: String,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// # Returns
    /// The loaded settings, or default settings if the file doesn't exist or is empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to a JSON file, creating the parent directory if needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create settings directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| Error::Config(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Reject settings that cannot open a store
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(Error::Config("namespace must not be empty".to_string()));
        }
        if self.backend != BackendKind::Memory && self.data_path.trim().is_empty() {
            return Err(Error::Config("data_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Path of the SQLite database used by [`BackendKind::Sqlite`]
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.data_path).join("inbox.db")
    }

    /// Build the configured backend
    pub fn open_backend(&self) -> Result<DynBackend> {
        self.validate()?;

        let backend: DynBackend = match self.backend {
            BackendKind::Memory => Box::new(MemoryStore::new()),
            BackendKind::File => Box::new(FileStore::new(&self.data_path)?),
            BackendKind::Sqlite => {
                std::fs::create_dir_all(&self.data_path).map_err(|e| {
                    Error::StorageUnavailable(format!("Failed to create data directory: {}", e))
                })?;
                Box::new(SqliteStore::new(self.database_path())?)
            }
        };

        tracing::info!(backend = ?self.backend, data_path = %self.data_path, "Opened inbox backend");
        Ok(backend)
    }

    /// Build the configured backend and wrap it in a message store
    pub fn open_store(&self) -> Result<MessageStore<DynBackend>> {
        Ok(MessageStore::new(self.open_backend()?, self.namespace.clone()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_path: "./data".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            sender_name: "Guest".to_string(),
        }
    }
}
