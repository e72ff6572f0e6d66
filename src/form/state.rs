//! Field-state container.
//!
//! Holds the value bag, the per-field error map, and the per-field
//! touched/dirty flags for one form instance. The container is synchronous
//! and runs every operation to completion; the async submit lifecycle lives
//! in [`submit`](super::submit).
//!
//! Validity is never cached: [`FormState::is_valid`] re-derives from the
//! current values and the static rule set on every read, so it cannot lag
//! behind a mutation. The error map exists only because errors carry
//! messages; every entry is recomputed whenever the field it describes
//! changes.

use std::collections::HashMap;

use super::evaluate::evaluate;
use super::rule::{Field, FieldRule};

bitflags::bitflags! {
    /// Per-field interaction state.
    ///
    /// `TOUCHED` gates whether an error is *shown*, never whether the value
    /// is valid. `DIRTY` tracks divergence from the initial snapshot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct FieldFlags: u8 {
        const TOUCHED = 1 << 0;
        const DIRTY   = 1 << 1;
    }
}

/// The value bag: one current string value per declared field.
///
/// Keys are fixed at construction and never added or removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues<F: Field> {
    entries: HashMap<F, String>,
}

impl<F: Field> FormValues<F> {
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (F, String)>) -> Self {
        FormValues { entries: pairs.into_iter().collect() }
    }

    /// Current value of `field`, or `""` when the field is not declared.
    pub fn get(&self, field: F) -> &str {
        self.entries.get(&field).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn insert(&mut self, field: F, value: String) {
        self.entries.insert(field, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State for one form instance: values, errors, flags, and the rule set.
///
/// Created once per logical form (with an initial snapshot and a fixed rule
/// set), lives as long as the form, and is discarded without teardown.
pub struct FormState<F: Field> {
    /// Declaration order; drives deterministic `validate_all` iteration.
    fields: Vec<F>,
    initial: HashMap<F, String>,
    values: FormValues<F>,
    rules: Vec<FieldRule<F>>,
    /// Present only for fields currently judged invalid; rebuilt, never
    /// patched.
    errors: HashMap<F, String>,
    flags: HashMap<F, FieldFlags>,
}

impl<F: Field> FormState<F> {
    /// Build a container from the initial snapshot and rule set.
    ///
    /// # Panics
    ///
    /// Panics when a field is declared twice or a rule references a field
    /// that is not in the initial snapshot — both are bugs in the calling
    /// form, not user input.
    pub fn new(initial: Vec<(F, String)>, rules: Vec<FieldRule<F>>) -> Self {
        let mut fields = Vec::with_capacity(initial.len());
        let mut snapshot = HashMap::with_capacity(initial.len());
        for (field, value) in initial {
            assert!(
                snapshot.insert(field, value).is_none(),
                "field `{}` declared twice",
                field.name()
            );
            fields.push(field);
        }
        for rule in &rules {
            assert!(
                snapshot.contains_key(&rule.field),
                "rule references undeclared field `{}`",
                rule.field.name()
            );
        }

        let values = FormValues { entries: snapshot.clone() };
        FormState { fields, initial: snapshot, values, rules, errors: HashMap::new(), flags: HashMap::new() }
    }

    // --- Mutation entry points ----------------------------------------------

    /// Overwrite `field` and immediately re-validate it. Does not mark the
    /// field touched; refreshes its dirty flag against the initial snapshot.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared field.
    pub fn set_value(&mut self, field: F, value: impl Into<String>) {
        self.assert_declared(field);
        let value = value.into();
        let dirty = self.initial.get(&field).is_none_or(|initial| *initial != value);
        self.values.insert(field, value);
        self.set_flag(field, FieldFlags::DIRTY, dirty);
        self.revalidate(field);
    }

    /// Overwrite `field` for a programmatic prefill (navigation state, saved
    /// drafts). Same per-field re-validation as [`set_value`], but neither
    /// the touched nor the dirty flag moves.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared field.
    ///
    /// [`set_value`]: FormState::set_value
    pub fn set_value_silently(&mut self, field: F, value: impl Into<String>) {
        self.assert_declared(field);
        self.values.insert(field, value.into());
        self.revalidate(field);
    }

    /// Mark `field` touched (first blur) and re-validate it, so a
    /// just-blurred empty required field shows its error right away.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared field.
    pub fn mark_touched(&mut self, field: F) {
        self.assert_declared(field);
        self.set_flag(field, FieldFlags::TOUCHED, true);
        self.revalidate(field);
    }

    /// Run every rule against current values, replace the error map
    /// wholesale, and mark every field touched. Returns whether the
    /// resulting error set is empty.
    pub fn validate_all(&mut self) -> bool {
        let mut errors = HashMap::new();
        for rule in &self.rules {
            if let Some(message) = evaluate(rule, self.values.get(rule.field), &self.values) {
                errors.insert(rule.field, message);
            }
        }
        self.errors = errors;
        for field in self.fields.clone() {
            self.set_flag(field, FieldFlags::TOUCHED, true);
        }
        self.errors.is_empty()
    }

    /// Restore the construction-time snapshot and clear errors and flags
    /// unconditionally.
    pub fn reset(&mut self) {
        self.values = FormValues { entries: self.initial.clone() };
        self.errors.clear();
        self.flags.clear();
    }

    // --- Observed state -----------------------------------------------------

    pub fn value(&self, field: F) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FormValues<F> {
        &self.values
    }

    pub fn fields(&self) -> &[F] {
        &self.fields
    }

    /// Current error for `field`, touched or not.
    pub fn error(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The full error map: entries exist only for currently-invalid fields.
    pub fn errors(&self) -> &HashMap<F, String> {
        &self.errors
    }

    /// Error for `field` only once the field has been touched — what a UI
    /// should render next to the input.
    pub fn visible_error(&self, field: F) -> Option<&str> {
        if self.touched(field) { self.error(field) } else { None }
    }

    pub fn touched(&self, field: F) -> bool {
        self.flag(field).contains(FieldFlags::TOUCHED)
    }

    /// Whether `field`'s current value differs from its initial snapshot.
    pub fn dirty(&self, field: F) -> bool {
        self.flag(field).contains(FieldFlags::DIRTY)
    }

    /// Whole-form validity, derived on read from current values and the
    /// rule set. Touch state is never consulted: an untouched invalid field
    /// still makes the form invalid, it just shows no message yet.
    pub fn is_valid(&self) -> bool {
        self.rules.iter().all(|rule| evaluate(rule, self.values.get(rule.field), &self.values).is_none())
    }

    // --- Internals ----------------------------------------------------------

    fn assert_declared(&self, field: F) {
        assert!(
            self.initial.contains_key(&field),
            "unknown field `{}` for this form",
            field.name()
        );
    }

    /// Re-run the evaluator for one field and update its error entry.
    fn revalidate(&mut self, field: F) {
        let Some(rule) = self.rules.iter().find(|rule| rule.field == field) else {
            return; // fields without rules are never validated
        };
        match evaluate(rule, self.values.get(field), &self.values) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(&field),
        };
    }

    fn flag(&self, field: F) -> FieldFlags {
        self.flags.get(&field).copied().unwrap_or_default()
    }

    fn set_flag(&mut self, field: F, flag: FieldFlags, on: bool) {
        let entry = self.flags.entry(field).or_default();
        entry.set(flag, on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::evaluate::{MSG_FORMAT, MSG_REQUIRED, msg_min_length};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum F {
        Email,
        Password,
    }

    impl Field for F {
        fn name(&self) -> &'static str {
            match self {
                F::Email => "email",
                F::Password => "password",
            }
        }
    }

    fn login_state() -> FormState<F> {
        FormState::new(
            vec![(F::Email, String::new()), (F::Password, String::new())],
            vec![
                rule! {
                    field: F::Email,
                    required: true,
                    pattern: regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
                },
                rule! { field: F::Password, required: true, min_length: 6 },
            ],
        )
    }

    #[test]
    fn set_value_validates_the_field_immediately() {
        let mut state = login_state();

        state.set_value(F::Email, "not-an-email");
        assert_eq!(state.error(F::Email), Some(MSG_FORMAT));
        assert!(!state.is_valid());

        state.set_value(F::Email, "a@b.com");
        state.set_value(F::Password, "123");
        assert_eq!(state.error(F::Email), None);
        assert_eq!(state.error(F::Password), Some(msg_min_length(6).as_str()));
        assert!(!state.is_valid());

        state.set_value(F::Password, "123456");
        assert!(state.error(F::Password).is_none());
        assert!(state.is_valid());
    }

    #[test]
    fn is_valid_never_lags_behind_values() {
        let mut state = login_state();
        assert!(!state.is_valid()); // required fields are empty

        state.set_value(F::Email, "a@b.com");
        state.set_value(F::Password, "123456");
        assert!(state.is_valid());

        state.set_value(F::Password, "");
        assert!(!state.is_valid());
    }

    #[test]
    fn touched_gates_display_not_validity() {
        let mut state = login_state();
        state.set_value(F::Email, "nope");

        // The error exists internally and counts against validity...
        assert_eq!(state.error(F::Email), Some(MSG_FORMAT));
        assert!(!state.is_valid());
        // ...but nothing is shown until the field is touched.
        assert_eq!(state.visible_error(F::Email), None);

        state.mark_touched(F::Email);
        assert_eq!(state.visible_error(F::Email), Some(MSG_FORMAT));
    }

    #[test]
    fn blur_on_empty_required_field_shows_the_error() {
        let mut state = login_state();
        state.mark_touched(F::Email);
        assert_eq!(state.visible_error(F::Email), Some(MSG_REQUIRED));
    }

    #[test]
    fn validate_all_touches_everything_and_reports_emptiness() {
        let mut state = login_state();
        assert!(!state.validate_all());
        assert!(state.touched(F::Email));
        assert!(state.touched(F::Password));
        assert_eq!(state.error(F::Email), Some(MSG_REQUIRED));
        assert_eq!(state.error(F::Password), Some(MSG_REQUIRED));

        state.set_value(F::Email, "a@b.com");
        state.set_value(F::Password, "123456");
        assert!(state.validate_all());
    }

    #[test]
    fn reset_restores_the_initial_snapshot_exactly() {
        let mut state = FormState::new(
            vec![(F::Email, "seed@b.com".to_string()), (F::Password, String::new())],
            vec![rule! { field: F::Password, required: true }],
        );
        state.set_value(F::Email, "other@b.com");
        state.mark_touched(F::Email);
        state.validate_all();
        assert!(state.dirty(F::Email));

        state.reset();
        assert_eq!(state.value(F::Email), "seed@b.com");
        assert_eq!(state.value(F::Password), "");
        assert_eq!(state.error(F::Email), None);
        assert_eq!(state.error(F::Password), None);
        assert!(!state.touched(F::Email));
        assert!(!state.dirty(F::Email));
    }

    #[test]
    fn silent_set_revalidates_without_flags() {
        let mut state = login_state();
        state.set_value_silently(F::Email, "not-an-email");

        assert_eq!(state.value(F::Email), "not-an-email");
        assert_eq!(state.error(F::Email), Some(MSG_FORMAT));
        assert!(!state.touched(F::Email));
        assert!(!state.dirty(F::Email));
    }

    #[test]
    fn dirty_clears_when_the_value_returns_to_initial() {
        let mut state = login_state();
        state.set_value(F::Email, "a@b.com");
        assert!(state.dirty(F::Email));

        state.set_value(F::Email, "");
        assert!(!state.dirty(F::Email));
    }

    #[test]
    fn fields_without_rules_are_never_validated() {
        let mut state = FormState::new(
            vec![(F::Email, String::new()), (F::Password, String::new())],
            vec![rule! { field: F::Password, required: true }],
        );
        state.set_value(F::Email, "anything at all");
        assert_eq!(state.error(F::Email), None);

        state.validate_all();
        assert_eq!(state.error(F::Email), None);
    }

    #[test]
    #[should_panic(expected = "unknown field")]
    fn unknown_field_is_a_contract_violation() {
        let mut state = FormState::new(
            vec![(F::Email, String::new())],
            vec![],
        );
        state.set_value(F::Password, "x");
    }

    #[test]
    #[should_panic(expected = "undeclared field")]
    fn rule_for_undeclared_field_fails_fast() {
        let _ = FormState::new(
            vec![(F::Email, String::new())],
            vec![rule! { field: F::Password, required: true }],
        );
    }
}
