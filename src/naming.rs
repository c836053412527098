//! Identifier casing between database and application conventions.
//!
//! Database schemas report `snake_case` columns; constructor parameter names
//! are assumed already in application case. Matching never inverts a
//! transform; both sides are normalized to Pascal case independently and then
//! compared (see [`crate::resolve`]).

/// Convert a separator-delimited identifier to `PascalCase`.
///
/// Splits on underscore, capitalizes the first letter of each non-empty
/// segment, and concatenates. Empty input is returned unchanged.
#[must_use]
pub fn to_pascal_case(input: &str) -> String {
    to_pascal_case_with(input, '_')
}

/// [`to_pascal_case`] with a configurable separator.
#[must_use]
pub fn to_pascal_case_with(input: &str, separator: char) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(input.len());
    for word in input.split(separator) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// Convert a separator-delimited identifier to `camelCase`.
///
/// Pascal case with the first letter lowercased. Empty input is returned
/// unchanged.
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}
