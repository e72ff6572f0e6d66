//! Registration form: identity, contact, and credential fields.
//!
//! Carries the two rules the generic constraints cannot express: the
//! birth-date age window and the confirm-password cross-field equality.

use chrono::{Local, NaiveDate};

use crate::form::{Field, FieldRule, Form, FormBuilder, FormValues};

use super::patterns;

pub const MSG_PASSWORDS_MISMATCH: &str = "Passwords do not match";
pub const MSG_UNDERAGE: &str = "You must be at least 18 years old";
pub const MSG_INVALID_BIRTH_DATE: &str = "Please enter a valid birth date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
    Gender,
    City,
    State,
    Password,
    ConfirmPassword,
}

impl Field for RegistrationField {
    fn name(&self) -> &'static str {
        match self {
            RegistrationField::FirstName => "firstName",
            RegistrationField::LastName => "lastName",
            RegistrationField::Email => "email",
            RegistrationField::Phone => "phone",
            RegistrationField::BirthDate => "birthDate",
            RegistrationField::Gender => "gender",
            RegistrationField::City => "city",
            RegistrationField::State => "state",
            RegistrationField::Password => "password",
            RegistrationField::ConfirmPassword => "confirmPassword",
        }
    }
}

pub fn rules() -> Vec<FieldRule<RegistrationField>> {
    vec![
        rule! {
            field: RegistrationField::FirstName,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "First name contains invalid characters",
        },
        rule! {
            field: RegistrationField::LastName,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "Last name contains invalid characters",
        },
        rule! {
            field: RegistrationField::Email,
            required: true,
            pattern: patterns::email(),
            pattern_message: "Please enter a valid email address",
        },
        rule! {
            field: RegistrationField::Phone,
            pattern: patterns::phone(),
            pattern_message: "Please enter a valid phone number",
        },
        rule! {
            field: RegistrationField::BirthDate,
            required: true,
            custom: |value: &str, _: &FormValues<RegistrationField>| check_birth_date(value),
        },
        rule! {
            field: RegistrationField::City,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "City contains invalid characters",
        },
        rule! {
            field: RegistrationField::State,
            required: true,
            min_length: 2,
            max_length: 50,
            pattern: patterns::name(),
            pattern_message: "State contains invalid characters",
        },
        rule! { field: RegistrationField::Password, required: true, min_length: 6 },
        rule! {
            field: RegistrationField::ConfirmPassword,
            required: true,
            custom: |value: &str, values: &FormValues<RegistrationField>| {
                (value != values.get(RegistrationField::Password))
                    .then(|| MSG_PASSWORDS_MISMATCH.to_string())
            },
        },
    ]
}

/// Builder preloaded with the registration fields and rules. `gender` is
/// declared but carries no rule: it is optional and never validated.
pub fn builder() -> FormBuilder<RegistrationField> {
    let mut builder = Form::builder();
    for field in [
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::Email,
        RegistrationField::Phone,
        RegistrationField::BirthDate,
        RegistrationField::Gender,
        RegistrationField::City,
        RegistrationField::State,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
    ] {
        builder = builder.field(field, "");
    }
    builder.rules(rules())
}

/// A birth date is an ISO `YYYY-MM-DD` date putting the applicant between
/// 18 and 120 years old today.
fn check_birth_date(value: &str) -> Option<String> {
    let Ok(birth) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") else {
        return Some(MSG_INVALID_BIRTH_DATE.to_string());
    };
    match Local::now().date_naive().years_since(birth) {
        None => Some(MSG_UNDERAGE.to_string()), // birth date in the future
        Some(age) if age < 18 => Some(MSG_UNDERAGE.to_string()),
        Some(age) if age > 120 => Some(MSG_INVALID_BIRTH_DATE.to_string()),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn years_ago(years: i32) -> String {
        let today = Local::now().date_naive();
        // Clamp Feb 29 safely by using Jan 1 of the target year.
        NaiveDate::from_ymd_opt(today.year() - years, 1, 1).unwrap().format("%Y-%m-%d").to_string()
    }

    #[test]
    fn birth_date_age_window() {
        assert_eq!(check_birth_date(&years_ago(30)), None);
        assert_eq!(check_birth_date(&years_ago(10)), Some(MSG_UNDERAGE.to_string()));
        assert_eq!(check_birth_date(&years_ago(130)), Some(MSG_INVALID_BIRTH_DATE.to_string()));
        assert_eq!(check_birth_date("not-a-date"), Some(MSG_INVALID_BIRTH_DATE.to_string()));
        assert_eq!(check_birth_date(&years_ago(-1)), Some(MSG_UNDERAGE.to_string()));
    }
}
