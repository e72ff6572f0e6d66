//! Rule evaluation.
//!
//! Pure functions: a field's current value plus its [`FieldRule`] in, either
//! `None` (valid) or a single human-readable message out. Short-circuiting
//! keeps one field from reporting contradictory errors at once — the user
//! sees the most fundamental problem first (missing value before format,
//! format before business rule).

use regex::Regex;

use super::rule::{Field, FieldRule};
use super::state::FormValues;

pub(crate) const MSG_REQUIRED: &str = "This field is required";
pub(crate) const MSG_FORMAT: &str = "Invalid format";

pub(crate) fn msg_min_length(min: usize) -> String {
    format!("Minimum {min} characters required")
}

pub(crate) fn msg_max_length(max: usize) -> String {
    format!("Maximum {max} characters allowed")
}

/// Evaluate one rule against the field's current value.
///
/// `values` is the full value bag, consulted only by `custom` checks that
/// need sibling fields. Returns the first failing constraint's message.
pub(crate) fn evaluate<F: Field>(
    rule: &FieldRule<F>,
    value: &str,
    values: &FormValues<F>,
) -> Option<String> {
    if rule.required && value.trim().is_empty() {
        return Some(MSG_REQUIRED.to_string());
    }

    // An empty optional field is always valid; no further checks apply.
    if !rule.required && value.trim().is_empty() {
        return None;
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return Some(msg_min_length(min));
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return Some(msg_max_length(max));
        }
    }

    if let Some(pattern) = rule.pattern {
        if !full_match(pattern, value) {
            return Some(rule.pattern_message.unwrap_or(MSG_FORMAT).to_string());
        }
    }

    if let Some(custom) = &rule.custom {
        if let Some(message) = custom(value, values) {
            return Some(message);
        }
    }

    None
}

/// True when `re` matches `value` over its entire length.
fn full_match(re: &Regex, value: &str) -> bool {
    re.find(value).is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::state::FormValues;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum F {
        Email,
        Password,
        Confirm,
    }

    impl Field for F {
        fn name(&self) -> &'static str {
            match self {
                F::Email => "email",
                F::Password => "password",
                F::Confirm => "confirm",
            }
        }
    }

    fn empty_values() -> FormValues<F> {
        FormValues::from_pairs([(F::Email, String::new()), (F::Password, String::new())])
    }

    #[test]
    fn required_rejects_empty_and_whitespace() {
        let rule = rule! { field: F::Email, required: true };
        let values = empty_values();

        assert_eq!(evaluate(&rule, "", &values), Some(MSG_REQUIRED.to_string()));
        assert_eq!(evaluate(&rule, "   ", &values), Some(MSG_REQUIRED.to_string()));
        assert_eq!(evaluate(&rule, "x", &values), None);
    }

    #[test]
    fn required_wins_over_every_other_constraint() {
        let rule = rule! {
            field: F::Password,
            required: true,
            min_length: 6,
            pattern: regex!(r"^\d+$"),
        };
        assert_eq!(evaluate(&rule, "  ", &empty_values()), Some(MSG_REQUIRED.to_string()));
    }

    #[test]
    fn optional_empty_skips_all_checks() {
        let rule = rule! {
            field: F::Email,
            min_length: 5,
            pattern: regex!(r"^\d+$"),
            custom: |_: &str, _: &FormValues<F>| Some("never valid".to_string()),
        };
        assert_eq!(evaluate(&rule, "", &empty_values()), None);
        assert_eq!(evaluate(&rule, "  ", &empty_values()), None);
    }

    #[test]
    fn min_length_short_circuits_pattern() {
        // Too short *and* pattern-mismatched: only the length error surfaces.
        let rule = rule! {
            field: F::Password,
            required: true,
            min_length: 6,
            pattern: regex!(r"^\d+$"),
        };
        assert_eq!(evaluate(&rule, "ab", &empty_values()), Some(msg_min_length(6)));
    }

    #[test]
    fn max_length_cites_the_maximum() {
        let rule = rule! { field: F::Email, max_length: 3 };
        assert_eq!(evaluate(&rule, "abcd", &empty_values()), Some(msg_max_length(3)));
        assert_eq!(evaluate(&rule, "abc", &empty_values()), None);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rule = rule! { field: F::Email, max_length: 4 };
        assert_eq!(evaluate(&rule, "José", &empty_values()), None);
    }

    #[test]
    fn pattern_requires_a_full_match() {
        let rule = rule! { field: F::Email, pattern: regex!(r"\d{4}") };
        assert_eq!(evaluate(&rule, "1984", &empty_values()), None);
        assert_eq!(evaluate(&rule, "x1984", &empty_values()), Some(MSG_FORMAT.to_string()));
        assert_eq!(evaluate(&rule, "19845", &empty_values()), Some(MSG_FORMAT.to_string()));
    }

    #[test]
    fn pattern_message_overrides_the_generic_one() {
        let rule = rule! {
            field: F::Email,
            pattern: regex!(r"^\d{4}$"),
            pattern_message: "Please enter a valid year",
        };
        assert_eq!(
            evaluate(&rule, "19x4", &empty_values()),
            Some("Please enter a valid year".to_string())
        );
    }

    #[test]
    fn custom_sees_sibling_fields() {
        let rule = rule! {
            field: F::Confirm,
            required: true,
            custom: |value: &str, values: &FormValues<F>| {
                (value != values.get(F::Password)).then(|| "Passwords do not match".to_string())
            },
        };
        let values =
            FormValues::from_pairs([(F::Password, "abc123".to_string()), (F::Confirm, String::new())]);

        assert_eq!(evaluate(&rule, "abc124", &values), Some("Passwords do not match".to_string()));
        assert_eq!(evaluate(&rule, "abc123", &values), None);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let rule = rule! {
            field: F::Email,
            required: true,
            pattern: regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
        };
        let values = empty_values();
        for value in ["", "not-an-email", "a@b.com"] {
            assert_eq!(evaluate(&rule, value, &values), evaluate(&rule, value, &values));
        }
    }
}
