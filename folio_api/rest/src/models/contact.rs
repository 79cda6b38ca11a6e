use chrono::{DateTime, Utc};
use folio_models::contact::{
    ContactEmail, ContactFieldError, ContactMessage, ContactMessageContent, ContactMessageId,
    ContactName, ContactSubject, ContactSubmission,
};
use serde::Serialize;

use super::ApiFieldError;

#[derive(Debug, Clone, Serialize)]
pub struct ApiContactMessage {
    /// Id assigned by the database
    pub id: ContactMessageId,
    /// Name of the sender
    pub name: ContactName,
    /// Email address of the sender
    pub email: ContactEmail,
    /// Subject of the message
    pub subject: ContactSubject,
    /// Content of the message
    pub message: ContactMessageContent,
    /// Time at which the message was stored
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ApiContactMessage {
    fn from(value: ContactMessage) -> Self {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = value.submission;

        Self {
            id: value.id,
            name,
            email,
            subject,
            message,
            created_at: value.created_at,
        }
    }
}

impl From<ContactFieldError> for ApiFieldError {
    fn from(value: ContactFieldError) -> Self {
        Self {
            field: value.field.as_str(),
            message: value.message,
        }
    }
}
