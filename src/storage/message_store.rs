//! Message collection persisted under a single namespace key
//!
//! The whole collection is stored as one JSON document:
//!
//! ```json
//! {"schemaVersion":1,"revision":3,"messages":[ ... ]}
//! ```
//!
//! Messages are kept most-recent-first by insertion; the store never re-sorts
//! by timestamp. Every mutation rewrites the full document.
//!
//! Reads through [`MessageStore::list`] are fail-soft: a missing, unreadable or
//! corrupt document reads as an empty inbox. [`MessageStore::try_list`] is the
//! strict variant for callers that need to tell the two apart. Writes are
//! fail-loud and surface backend failures as [`Error::StorageUnavailable`].

use crate::{
    storage::{
        backend::KeyValueStore,
        message::{Message, MessageDraft, MessageStatus},
    },
    Error, Result,
};
use chrono::{SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Key used when no namespace is configured
pub const DEFAULT_NAMESPACE: &str = "homeleasing_messages";

/// Schema version written by this crate
pub const SCHEMA_VERSION: u32 = 1;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Versioned on-disk document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    #[serde(default)]
    revision: u64,
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct Snapshot {
    revision: u64,
    messages: Vec<Message>,
}

fn corrupt(e: serde_json::Error) -> Error {
    Error::CorruptStore(e.to_string())
}

/// Decode a stored document
///
/// The schema version is read before any record is decoded, so a newer
/// document whose records this version cannot represent is still reported as
/// [`Error::UnsupportedSchema`] rather than as corrupt.
fn decode(data: &str) -> Result<Snapshot> {
    let value: Value = serde_json::from_str(data).map_err(corrupt)?;

    match value {
        Value::Array(_) => Ok(Snapshot {
            revision: 0,
            messages: serde_json::from_value(value).map_err(corrupt)?,
        }),
        Value::Object(ref fields) => {
            if let Some(version) = fields.get("schemaVersion").and_then(Value::as_u64) {
                if version > u64::from(SCHEMA_VERSION) {
                    return Err(Error::UnsupportedSchema(
                        u32::try_from(version).unwrap_or(u32::MAX),
                    ));
                }
            }
            let envelope: Envelope = serde_json::from_value(value).map_err(corrupt)?;
            Ok(Snapshot {
                revision: envelope.revision,
                messages: envelope.messages,
            })
        }
        _ => Err(Error::CorruptStore(
            "expected a message document or array".to_string(),
        )),
    }
}

/// Generate a message id of the form `msg_<unix millis>_<9 base-36 chars>`
pub fn generate_message_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("msg_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// The inbox message store
///
/// Owns its backend and the namespace key it writes to. Several stores with
/// different namespaces can share one backend file or database.
///
/// # Example
/// ```rust
/// use homelease_inbox::storage::{MemoryStore, MessageCategory, MessageDraft, MessageStore};
///
/// let mut store = MessageStore::with_default_namespace(MemoryStore::new());
/// let message = store.create(MessageDraft {
///     property_id: "p1".to_string(),
///     property_title: "Loft".to_string(),
///     subject: "Hi".to_string(),
///     body: "Is this available?".to_string(),
///     sender: "Jo".to_string(),
///     category: MessageCategory::Inquiry,
/// }).expect("Failed to create message");
///
/// assert_eq!(store.list(), vec![message]);
/// ```
#[derive(Debug)]
pub struct MessageStore<B: KeyValueStore> {
    backend: B,
    namespace: String,
}

impl<B: KeyValueStore> MessageStore<B> {
    /// Create a store persisting under `namespace`
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Create a store persisting under [`DEFAULT_NAMESPACE`]
    pub fn with_default_namespace(backend: B) -> Self {
        Self::new(backend, DEFAULT_NAMESPACE)
    }

    /// Key the collection is stored under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the store and return its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    // ========== Reads ==========

    /// All messages, most recently created first
    ///
    /// Never fails: a missing, unreadable or corrupt document reads as empty.
    pub fn list(&self) -> Vec<Message> {
        match self.try_list() {
            Ok(messages) => messages,
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "Reading message store as empty");
                Vec::new()
            }
        }
    }

    /// All messages, distinguishing a corrupt or unreadable store from an empty one
    pub fn try_list(&self) -> Result<Vec<Message>> {
        Ok(self.read_snapshot()?.messages)
    }

    /// Look up a single message
    pub fn get(&self, id: &str) -> Option<Message> {
        self.list().into_iter().find(|m| m.id == id)
    }

    /// Number of unread messages
    pub fn unread_count(&self) -> usize {
        self.list().iter().filter(|m| m.is_unread()).count()
    }

    /// Write counter of the persisted document, 0 when nothing was written yet
    pub fn revision(&self) -> u64 {
        self.read_snapshot().map(|s| s.revision).unwrap_or(0)
    }

    // ========== Mutations ==========

    /// Store a new unread message at the head of the collection
    ///
    /// The draft is stored as given; validation belongs to the caller.
    pub fn create(&mut self, draft: MessageDraft) -> Result<Message> {
        let mut snapshot = self.read_for_update()?;

        let mut id = generate_message_id();
        while snapshot.messages.iter().any(|m| m.id == id) {
            id = generate_message_id();
        }

        let message = Message::from_draft(draft, id, Utc::now().trunc_subsecs(3));
        snapshot.messages.insert(0, message.clone());
        self.persist(snapshot)?;

        info!(
            id = %message.id,
            property_id = %message.property_id,
            category = %message.category,
            "Message created"
        );
        Ok(message)
    }

    /// Set the status of a message
    ///
    /// Returns `false` without writing when no message has this id. Setting the
    /// status a message already has still rewrites the collection.
    pub fn update_status(&mut self, id: &str, status: MessageStatus) -> Result<bool> {
        let mut snapshot = self.read_for_update()?;

        let Some(message) = snapshot.messages.iter_mut().find(|m| m.id == id) else {
            debug!(id, "Status update for unknown message ignored");
            return Ok(false);
        };
        message.status = status;

        self.persist(snapshot)?;
        Ok(true)
    }

    /// Flip a message between unread and read, returning the new status
    pub fn toggle_status(&mut self, id: &str) -> Result<Option<MessageStatus>> {
        let mut snapshot = self.read_for_update()?;

        let Some(message) = snapshot.messages.iter_mut().find(|m| m.id == id) else {
            debug!(id, "Toggle for unknown message ignored");
            return Ok(None);
        };
        message.status = message.status.toggled();
        let status = message.status;

        self.persist(snapshot)?;
        Ok(Some(status))
    }

    /// Remove a message, returning `false` without writing when it is absent
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut snapshot = self.read_for_update()?;

        let Some(index) = snapshot.messages.iter().position(|m| m.id == id) else {
            debug!(id, "Delete for unknown message ignored");
            return Ok(false);
        };
        snapshot.messages.remove(index);

        self.persist(snapshot)?;
        info!(id, "Message deleted");
        Ok(true)
    }

    /// Remove the whole collection from the backend
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(&self.namespace)?;
        info!(namespace = %self.namespace, "Message store cleared");
        Ok(())
    }

    // ========== Internals ==========

    fn read_snapshot(&self) -> Result<Snapshot> {
        match self.backend.get(&self.namespace)? {
            None => Ok(Snapshot::default()),
            Some(data) if data.trim().is_empty() => Ok(Snapshot::default()),
            Some(data) => decode(&data),
        }
    }

    /// Snapshot to mutate; a corrupt document is replaced by the next write
    fn read_for_update(&self) -> Result<Snapshot> {
        match self.read_snapshot() {
            Err(Error::CorruptStore(reason)) => {
                warn!(namespace = %self.namespace, %reason, "Overwriting corrupt message store");
                Ok(Snapshot::default())
            }
            other => other,
        }
    }

    fn persist(&mut self, snapshot: Snapshot) -> Result<()> {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            revision: snapshot.revision + 1,
            messages: snapshot.messages,
        };
        let json = serde_json::to_string(&envelope)?;

        self.backend.set(&self.namespace, &json)?;

        debug!(
            namespace = %self.namespace,
            revision = envelope.revision,
            count = envelope.messages.len(),
            "Message store written"
        );
        Ok(())
    }
}
