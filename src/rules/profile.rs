//! Profile form: the editable subset of a signed-in user's data.

use crate::form::{Field, FieldRule, Form, FormBuilder};

use super::patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    City,
    State,
}

impl Field for ProfileField {
    fn name(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::City => "city",
            ProfileField::State => "state",
        }
    }
}

pub fn rules() -> Vec<FieldRule<ProfileField>> {
    vec![
        rule! {
            field: ProfileField::Name,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "Name contains invalid characters",
        },
        rule! {
            field: ProfileField::Email,
            required: true,
            pattern: patterns::email(),
            pattern_message: "Please enter a valid email address",
        },
        rule! {
            field: ProfileField::Phone,
            pattern: patterns::phone(),
            pattern_message: "Please enter a valid phone number",
        },
        rule! {
            field: ProfileField::City,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "City contains invalid characters",
        },
        rule! {
            field: ProfileField::State,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "State contains invalid characters",
        },
    ]
}

/// Builder preloaded with the profile fields and rules; hosts prefill the
/// current user's data with `set_value_silently` after build.
pub fn builder() -> FormBuilder<ProfileField> {
    Form::builder()
        .field(ProfileField::Name, "")
        .field(ProfileField::Email, "")
        .field(ProfileField::Phone, "")
        .field(ProfileField::City, "")
        .field(ProfileField::State, "")
        .rules(rules())
}
