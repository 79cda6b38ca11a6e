//! Contact form submissions.
//!
//! [`ContactSubmission::validate`] is the single rule set for the contact
//! form. The API runs it on every request, and the user interface runs the
//! same code through [`ContactField::check`] while the form is being filled
//! in.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::macros::{id, nutype_string};

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

id!(ContactMessageId(i64));

nutype_string!(ContactName(sanitize(trim), validate(not_empty)));
nutype_string!(ContactEmail(
    sanitize(trim),
    validate(regex = CONTACT_EMAIL_REGEX)
));
nutype_string!(ContactSubject(sanitize(trim), validate(not_empty)));
nutype_string!(ContactMessageContent(
    sanitize(trim),
    validate(len_char_min = 10)
));

/// A validated and normalized contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessageContent,
}

/// A contact submission after it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub submission: ContactSubmission,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ContactFieldError {
    pub field: ContactField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact submission: {} field(s) rejected", .errors.len())]
pub struct ContactValidationError {
    /// One entry per rejected field, in the order of [`ContactField::ALL`].
    pub errors: Vec<ContactFieldError>,
}

impl ContactSubmission {
    /// Validate a raw contact form payload.
    ///
    /// Every field is checked independently and all violations are
    /// reported together. Unknown fields are ignored and a payload that is
    /// not a JSON object is treated like an empty one.
    pub fn validate(input: &Value) -> Result<Self, ContactValidationError> {
        let name = parse_name(input);
        let email = parse_email(input);
        let subject = parse_subject(input);
        let message = parse_message(input);

        match (name, email, subject, message) {
            (Ok(name), Ok(email), Ok(subject), Ok(message)) => Ok(Self {
                name,
                email,
                subject,
                message,
            }),
            (name, email, subject, message) => Err(ContactValidationError {
                errors: [name.err(), email.err(), subject.err(), message.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            }),
        }
    }
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Validate only this field of a raw contact form payload, using the
    /// same rules as [`ContactSubmission::validate`].
    pub fn check(self, input: &Value) -> Result<(), ContactFieldError> {
        match self {
            Self::Name => parse_name(input).map(drop),
            Self::Email => parse_email(input).map(drop),
            Self::Subject => parse_subject(input).map(drop),
            Self::Message => parse_message(input).map(drop),
        }
    }

    fn invalid_message(self) -> &'static str {
        match self {
            Self::Name => "Name is required",
            Self::Email => "Invalid email address",
            Self::Subject => "Subject is required",
            Self::Message => "Message must be at least 10 characters",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContactFieldError {
    pub const MISSING: &'static str = "Required";
    pub const NOT_A_STRING: &'static str = "Expected a string";

    fn new(field: ContactField, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn parse_name(input: &Value) -> Result<ContactName, ContactFieldError> {
    parse_field(input, ContactField::Name, |value| ContactName::try_new(value))
}

fn parse_email(input: &Value) -> Result<ContactEmail, ContactFieldError> {
    parse_field(input, ContactField::Email, |value| ContactEmail::try_new(value))
}

fn parse_subject(input: &Value) -> Result<ContactSubject, ContactFieldError> {
    parse_field(input, ContactField::Subject, |value| {
        ContactSubject::try_new(value)
    })
}

fn parse_message(input: &Value) -> Result<ContactMessageContent, ContactFieldError> {
    parse_field(input, ContactField::Message, |value| {
        ContactMessageContent::try_new(value)
    })
}

fn parse_field<T, E>(
    input: &Value,
    field: ContactField,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<T, ContactFieldError> {
    let value = match input.get(field.as_str()) {
        None | Some(Value::Null) => {
            return Err(ContactFieldError::new(field, ContactFieldError::MISSING))
        }
        Some(Value::String(value)) => value,
        Some(_) => {
            return Err(ContactFieldError::new(
                field,
                ContactFieldError::NOT_A_STRING,
            ))
        }
    };

    parse(value.clone()).map_err(|_| ContactFieldError::new(field, field.invalid_message()))
}
