//! Field rule configuration.
//!
//! A [`FieldRule`] is immutable configuration attached to one field at form
//! construction: which constraints apply and, where the generic message is
//! not enough, what to say instead. Rules are usually built with the
//! [`rule!`](crate::rule) macro rather than by hand.

use std::fmt;
use std::hash::Hash;

use regex::Regex;

use super::state::FormValues;

/// Typed key identifying one field of a form.
///
/// Forms declare their field set as a small `Copy` enum implementing this
/// trait, which keeps lookups typed while letting any subset of fields carry
/// rules.
pub trait Field: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Stable field name used in log output and error reporting.
    fn name(&self) -> &'static str;
}

/// Business-rule check: receives the field's current value and read access
/// to the full value bag (for cross-field checks such as password
/// confirmation). Returns `Some(message)` when the value is invalid.
pub type CustomCheck<F> = Box<dyn Fn(&str, &FormValues<F>) -> Option<String> + Send + Sync>;

/// Declarative constraints for a single field.
///
/// Constraint evaluation order is fixed (first failure wins): `required`,
/// then — for non-empty values only — `min_length`, `max_length`, `pattern`,
/// `custom`. See [`evaluate`](super::evaluate::evaluate).
pub struct FieldRule<F: Field> {
    pub field: F,
    /// Trimmed value must be non-empty.
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// The value must match over its full length, so unanchored patterns
    /// behave the same as anchored ones.
    pub pattern: Option<&'static Regex>,
    /// Message used instead of the generic "Invalid format" when `pattern`
    /// fails.
    pub pattern_message: Option<&'static str>,
    pub custom: Option<CustomCheck<F>>,
}

impl<F: Field> FieldRule<F> {
    /// A rule with no constraints; the `rule!` macro fills in the rest.
    pub fn new(field: F) -> Self {
        FieldRule {
            field,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            pattern_message: None,
            custom: None,
        }
    }
}

impl<F: Field> fmt::Debug for FieldRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.map(|re| re.as_str()))
            .field("custom", &self.custom.as_ref().map(|_| "<function>"))
            .finish()
    }
}
