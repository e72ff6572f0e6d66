//! Contact form: name, email, a fixed subject list, and a message body.

use crate::form::{Field, FieldRule, Form, FormBuilder, FormValues};

use super::patterns;

/// Subjects the contact form accepts, as submitted by the select input.
pub const SUBJECTS: [&str; 5] =
    ["query-question", "technical-issue", "suggestion", "partnership", "other"];

pub const MSG_INVALID_SUBJECT: &str = "Please select a valid subject";
pub const MSG_MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters long";
pub const MSG_MESSAGE_TOO_LONG: &str = "Message must not exceed 1000 characters";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl Field for ContactField {
    fn name(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

pub fn rules() -> Vec<FieldRule<ContactField>> {
    vec![
        rule! {
            field: ContactField::Name,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "Name contains invalid characters",
        },
        rule! {
            field: ContactField::Email,
            required: true,
            pattern: patterns::email(),
            pattern_message: "Please enter a valid email address",
        },
        rule! {
            field: ContactField::Subject,
            required: true,
            custom: |value: &str, _: &FormValues<ContactField>| {
                (!SUBJECTS.contains(&value)).then(|| MSG_INVALID_SUBJECT.to_string())
            },
        },
        rule! {
            field: ContactField::Message,
            required: true,
            custom: |value: &str, _: &FormValues<ContactField>| check_message(value),
        },
    ]
}

pub fn builder() -> FormBuilder<ContactField> {
    Form::builder()
        .field(ContactField::Name, "")
        .field(ContactField::Email, "")
        .field(ContactField::Subject, "")
        .field(ContactField::Message, "")
        .rules(rules())
}

/// Message bounds apply to the trimmed body, so padding with whitespace
/// cannot satisfy the minimum.
fn check_message(value: &str) -> Option<String> {
    let length = value.trim().chars().count();
    if length < 10 {
        Some(MSG_MESSAGE_TOO_SHORT.to_string())
    } else if length > 1000 {
        Some(MSG_MESSAGE_TOO_LONG.to_string())
    } else {
        None
    }
}
