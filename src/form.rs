//! Form state and submit lifecycle engine.
//!
//! This module is the core of the crate: a reusable engine that owns a typed
//! bag of field values, computes per-field and whole-form validity against a
//! declarative rule set, tracks touched/dirty state, and drives an async
//! submit lifecycle that reports outcomes to an injected notifier.
//!
//! ## How the parts work together
//!
//! One form instance is a small pipeline:
//!
//! ```text
//! rules (per field) ──┐
//!                     │  FieldRule            (rule.rs)
//!                     └──────────┬───────────
//!                                │
//! edits ── set_value ────────────┼─ evaluate changed field   (evaluate.rs)
//! blur  ── mark_touched ─────────┤
//!                                v
//!                        FormState             (state.rs)
//!                          - values / errors / flags
//!                          - is_valid derived on read
//!                                │
//!                                v
//!                        Form::submit          (submit.rs)
//!                          - validate_all, snapshot values
//!                          - await the caller's action
//!                          - notify success / failure
//! ```
//!
//! The evaluator is pure and short-circuits (first failure wins); the state
//! container is synchronous and runs each operation to completion; the
//! orchestrator is the only part that suspends, and it guards against a
//! second submit with an atomic check-and-set before the suspension point.
//!
//! ## Responsibilities by module
//!
//! - `rule.rs`: the [`Field`] key trait and the [`FieldRule`] constraint
//!   configuration (built with the [`rule!`](crate::rule) macro).
//! - `evaluate.rs`: the pure rule evaluator and its message catalog.
//! - `state.rs`: the field-state container — values, errors, touched/dirty
//!   flags, `validate_all`, `reset`.
//! - `submit.rs`: the submit lifecycle orchestrator and the form builder.
//!
//! Predefined field enums and rule sets for the application's forms live
//! under [`crate::rules`].

#[path = "form/evaluate.rs"]
mod evaluate;
#[path = "form/rule.rs"]
mod rule;
#[path = "form/state.rs"]
mod state;
#[path = "form/submit.rs"]
mod submit;

pub use rule::{CustomCheck, Field, FieldRule};
pub use state::{FormState, FormValues};
pub use submit::{BoxError, Form, FormBuilder, SubmitAction, SubmitOutcome};
