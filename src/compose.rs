//! Message composition
//!
//! Quick templates and the compose form used from a property page. The form
//! owns the input rules (subject and body must not be blank); the store
//! accepts whatever it is given.

use crate::{
    storage::{KeyValueStore, Message, MessageCategory, MessageDraft, MessageStore},
    Error, Result,
};

/// Error shown when subject or body is blank
pub const MISSING_FIELDS: &str = "Please fill in both subject and message.";

/// Pre-written message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Express interest in the property
    Interest,
    /// Ask for a viewing appointment
    Viewing,
    /// Ask for details such as utilities or pet policy
    Info,
    /// Open a price discussion
    Offer,
}

impl MessageTemplate {
    /// Get all templates in menu order
    pub fn all() -> [Self; 4] {
        [Self::Interest, Self::Viewing, Self::Info, Self::Offer]
    }

    /// Stable key of the template
    pub fn key(&self) -> &'static str {
        match self {
            Self::Interest => "interest",
            Self::Viewing => "viewing",
            Self::Info => "info",
            Self::Offer => "offer",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interest => "Express Interest",
            Self::Viewing => "Request Viewing",
            Self::Info => "Ask for More Info",
            Self::Offer => "Make an Offer",
        }
    }

    /// Template message text
    pub fn body(&self) -> &'static str {
        match self {
            Self::Interest => {
                "Hi, I'm interested in this property and would like to know more details."
            }
            Self::Viewing => {
                "Hello, I'd like to schedule a viewing for this property. Please let me know the available times."
            }
            Self::Info => {
                "Hi, could you provide more information about this property, such as utilities included or pet policy?"
            }
            Self::Offer => {
                "Hello, I'm interested in making an offer on this property. Can we discuss pricing?"
            }
        }
    }

    /// Category stored for messages written from this template
    pub fn category(&self) -> MessageCategory {
        match self {
            Self::Interest => MessageCategory::Inquiry,
            Self::Viewing => MessageCategory::Viewing,
            Self::Info => MessageCategory::Info,
            Self::Offer => MessageCategory::Offer,
        }
    }

    /// Look up a template by key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.key() == key)
    }
}

/// Compose form for one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeForm {
    /// Property the message concerns
    pub property_id: String,
    /// Property title shown in the form and stored with the message
    pub property_title: String,
    /// Sender name stamped on the message
    pub sender: String,
    /// Subject input
    pub subject: String,
    /// Message input
    pub body: String,
    /// Category stored with the message
    pub category: MessageCategory,
    /// Template last applied, if any
    pub template: Option<MessageTemplate>,
}

impl ComposeForm {
    /// Create an empty form
    pub fn new(
        property_id: impl Into<String>,
        property_title: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            property_title: property_title.into(),
            sender: sender.into(),
            subject: String::new(),
            body: String::new(),
            category: MessageCategory::Inquiry,
            template: None,
        }
    }

    /// Fill subject, body and category from a template
    pub fn apply_template(&mut self, template: MessageTemplate) {
        self.subject = format!("Regarding: {}", self.property_title);
        self.body = template.body().to_string();
        self.category = template.category();
        self.template = Some(template);
    }

    /// Check that subject and body are not blank
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() || self.body.trim().is_empty() {
            return Err(Error::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(())
    }

    /// Validated draft; subject and body are kept exactly as typed
    pub fn to_draft(&self) -> Result<MessageDraft> {
        self.validate()?;
        Ok(MessageDraft {
            property_id: self.property_id.clone(),
            property_title: self.property_title.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            sender: self.sender.clone(),
            category: self.category,
        })
    }

    /// Clear the inputs, keeping the property and sender
    pub fn reset(&mut self) {
        self.subject.clear();
        self.body.clear();
        self.category = MessageCategory::Inquiry;
        self.template = None;
    }

    /// Validate, store the message and reset the form
    ///
    /// On any error the form keeps its inputs so the user can retry.
    pub fn send<B: KeyValueStore>(&mut self, store: &mut MessageStore<B>) -> Result<Message> {
        let draft = self.to_draft()?;
        let message = store.create(draft)?;
        self.reset();
        Ok(message)
    }
}
