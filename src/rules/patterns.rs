//! Shared pattern catalog.
//!
//! Every pattern used by more than one form lives here, compiled once via
//! the `regex!` macro. Patterns are anchored; the evaluator additionally
//! requires a full match, so partial hits never pass.

use regex::Regex;

pub fn email() -> &'static Regex {
    regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

/// Brazilian phone shapes: optional two-digit area code in parentheses,
/// 4-5 digit prefix, 4 digit line, separated by spaces or dashes.
pub fn phone() -> &'static Regex {
    regex!(r"^\(?\d{2}\)?[\s-]?\d{4,5}[\s-]?\d{4}$")
}

/// Personal and place names: letters (including Latin-1 accents) and
/// spaces, 2 to 50 characters. Shared by name, city, and state fields.
pub fn name() -> &'static Regex {
    regex!(r"^[a-zA-ZÀ-ÿ\s]{2,50}$")
}

pub fn year() -> &'static Regex {
    regex!(r"^\d{4}$")
}
