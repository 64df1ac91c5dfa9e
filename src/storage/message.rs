//! Message structures, read status and category

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Read status of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Not yet opened in the inbox
    #[default]
    Unread,
    /// Opened or explicitly marked as read
    Read,
}

impl MessageStatus {
    /// The other status
    pub fn toggled(self) -> Self {
        match self {
            Self::Unread => Self::Read,
            Self::Read => Self::Unread,
        }
    }

    /// Wire name (`unread` / `read`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    /// Get human-readable status indicator
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Unread => "●",
            Self::Read => "✓",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            other => Err(crate::Error::Validation(format!("Unknown status: {}", other))),
        }
    }
}

/// Intent of a message, fixed at creation and used for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    /// General interest in a property
    Inquiry,
    /// Request to schedule a viewing
    Viewing,
    /// Request for more information
    Info,
    /// Price offer
    Offer,
}

impl MessageCategory {
    /// Get all categories in display order
    pub fn all() -> [Self; 4] {
        [Self::Inquiry, Self::Viewing, Self::Info, Self::Offer]
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inquiry => "inquiry",
            Self::Viewing => "viewing",
            Self::Info => "info",
            Self::Offer => "offer",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::Validation(format!("Unknown category: {}", s)))
    }
}

/// Caller-supplied fields of a new message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    /// Property the message concerns
    pub property_id: String,
    /// Property title at the time of writing
    pub property_title: String,
    /// Subject line
    pub subject: String,
    /// Message text
    pub body: String,
    /// Display name of the sender
    pub sender: String,
    /// Intent of the message
    pub category: MessageCategory,
}

/// A stored property inquiry
///
/// `property_id` and `property_title` are denormalized; the property may no
/// longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMessage")]
pub struct Message {
    /// Unique id, assigned at creation
    pub id: String,
    /// Property the message concerns
    pub property_id: String,
    /// Property title at the time of writing
    pub property_title: String,
    /// Subject line
    pub subject: String,
    /// Message text
    pub body: String,
    /// Display name of the sender
    pub sender: String,
    /// Creation time, never changes
    pub timestamp: DateTime<Utc>,
    /// Read status
    pub status: MessageStatus,
    /// Intent of the message
    pub category: MessageCategory,
}

/// A message record as read back from storage
///
/// Older records name the body `message` and the category `type`. When a
/// record carries both spellings the current one wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMessage {
    id: String,
    property_id: String,
    property_title: String,
    subject: String,
    body: Option<String>,
    message: Option<String>,
    sender: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    status: MessageStatus,
    category: Option<MessageCategory>,
    #[serde(rename = "type")]
    kind: Option<MessageCategory>,
}

impl TryFrom<StoredMessage> for Message {
    type Error = String;

    fn try_from(stored: StoredMessage) -> std::result::Result<Self, Self::Error> {
        let body = stored
            .body
            .or(stored.message)
            .ok_or_else(|| format!("message {} has no body", stored.id))?;
        let category = stored
            .category
            .or(stored.kind)
            .ok_or_else(|| format!("message {} has no category", stored.id))?;

        Ok(Self {
            id: stored.id,
            property_id: stored.property_id,
            property_title: stored.property_title,
            subject: stored.subject,
            body,
            sender: stored.sender,
            timestamp: stored.timestamp,
            status: stored.status,
            category,
        })
    }
}

impl Message {
    /// Build an unread message from a draft
    pub fn from_draft(draft: MessageDraft, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            property_id: draft.property_id,
            property_title: draft.property_title,
            subject: draft.subject,
            body: draft.body,
            sender: draft.sender,
            timestamp,
            status: MessageStatus::Unread,
            category: draft.category,
        }
    }

    /// Whether the message has not been read yet
    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }

    /// Date part of the timestamp, as shown in the inbox list
    pub fn display_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}
