//! Helpers for turning storage-level and schema-level field names into the
//! camelCase names exposed over the API.

use validator::ValidationErrors;

/// Convert a `snake_case` identifier to `camelCase`.
///
/// Identifiers without underscores are returned unchanged, so this is safe to
/// apply to names that are already camelCase.
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Collect the API names of every field that failed schema validation.
///
/// Sorted so responses are deterministic regardless of hash order.
pub fn failed_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|name| snake_to_camel(name))
        .collect();
    fields.sort();
    fields.dedup();
    fields
}
