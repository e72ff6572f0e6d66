//! Login form: email + password against the mock auth service.

use crate::form::{Field, FieldRule, Form, FormBuilder};

use super::patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl Field for LoginField {
    fn name(&self) -> &'static str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
        }
    }
}

pub fn rules() -> Vec<FieldRule<LoginField>> {
    vec![
        rule! {
            field: LoginField::Email,
            required: true,
            pattern: patterns::email(),
            pattern_message: "Please enter a valid email address",
        },
        rule! { field: LoginField::Password, required: true, min_length: 6 },
    ]
}

/// Builder preloaded with the login fields and rules; callers add the
/// submit action and notifier.
pub fn builder() -> FormBuilder<LoginField> {
    Form::builder()
        .field(LoginField::Email, "")
        .field(LoginField::Password, "")
        .rules(rules())
}
