//! Bidirectional mapping between internal (snake_case) and external
//! (camelCase) field identifiers.
//!
//! The mapping is applied once when a schema description is constructed
//! (see [`crate::FieldSpec`]) and at the wire boundary to rename the
//! top-level keys of JSON payloads. Nested social-link keys are single
//! words and therefore fixed points of both functions.

use serde_json::Value;

/// Convert an internal identifier to its external form:
/// `order_index` -> `orderIndex`.
pub fn to_external(name: &str) -> String {
    let mut parts = name.split('_');
    let mut out = String::with_capacity(name.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for word in parts {
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert an external identifier back to its internal form:
/// `orderIndex` -> `order_index`.
///
/// Mutual inverse of [`to_external`] for the identifier vocabulary used
/// by the Folio schemas (lowercase words joined by underscores).
pub fn to_internal(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rename the top-level keys of a JSON object to external form.
/// Non-object values pass through unchanged.
pub fn externalize_keys(value: Value) -> Value {
    rename_keys(value, to_external)
}

/// Rename the top-level keys of a JSON object to internal form.
pub fn internalize_keys(value: Value) -> Value {
    rename_keys(value, to_internal)
}

fn rename_keys(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (f(&k), v)).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_is_unchanged() {
        assert_eq!(to_external("slug"), "slug");
        assert_eq!(to_internal("slug"), "slug");
    }

    #[test]
    fn multi_word_round_trips() {
        assert_eq!(to_external("order_index"), "orderIndex");
        assert_eq!(to_internal("orderIndex"), "order_index");
        assert_eq!(to_external("created_at"), "createdAt");
        assert_eq!(to_internal("createdAt"), "created_at");
    }

    #[test]
    fn externalize_renames_top_level_only() {
        let v = serde_json::json!({
            "social_links": [{"platform": "GitHub"}],
            "hero_title": "hi",
        });
        let out = externalize_keys(v);
        assert!(out.get("socialLinks").is_some());
        assert!(out.get("heroTitle").is_some());
        assert_eq!(out["socialLinks"][0]["platform"], "GitHub");
    }
}
