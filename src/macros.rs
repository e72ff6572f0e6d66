#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        field: $field:expr
        $(, required: $required:expr)?
        $(, min_length: $min:expr)?
        $(, max_length: $max:expr)?
        $(, pattern: $pattern:expr)?
        $(, pattern_message: $pattern_message:expr)?
        $(, custom: $custom:expr)?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut rule = $crate::FieldRule::new($field);
        $(rule.required = $required;)?
        $(rule.min_length = Some($min);)?
        $(rule.max_length = Some($max);)?
        $(rule.pattern = Some($pattern);)?
        $(rule.pattern_message = Some($pattern_message);)?
        $(rule.custom = Some(Box::new($custom));)?
        rule
    }};
}
