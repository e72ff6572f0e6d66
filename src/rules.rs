//! Predefined field enums and rule sets for the application's forms.
//!
//! Each submodule declares one form: its typed field enum, its rule set,
//! and a builder preloaded with both. The shared regex catalog lives in
//! [`patterns`].

#[path = "rules/contact.rs"]
pub mod contact;
#[path = "rules/login.rs"]
pub mod login;
#[path = "rules/patterns.rs"]
pub mod patterns;
#[path = "rules/profile.rs"]
pub mod profile;
#[path = "rules/registration.rs"]
pub mod registration;
#[path = "rules/search.rs"]
pub mod search;
