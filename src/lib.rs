extern crate self as veicular;

#[macro_use]
mod macros;
mod form;

pub mod auth;
pub mod favorites;
pub mod notify;
pub mod rules;
pub mod store;
pub mod vehicle;

pub use form::{
    BoxError, CustomCheck, Field, FieldRule, Form, FormBuilder, FormState, FormValues,
    SubmitAction, SubmitOutcome,
};
pub use notify::{MemoryNotifier, Notice, Notifier, NotifyKind, NullNotifier};
