//! Generated configuration data: keyed merging and normalization
//!
//! Each generated configuration file is backed by one document in a
//! [`DataDocuments`] mapping, mutated by `data` actions during the
//! interview and normalized immediately before serialization.

use serde_json::{Map, Value};

/// In-memory content for generated configuration files, keyed by file name
///
/// Insertion order is preserved all the way to the serialized output.
pub type DataDocuments = Map<String, Value>;

/// Build a single-branch nested mapping holding `value` at the dotted
/// `path`, e.g. `"a.b.c"` becomes `{"a": {"b": {"c": value}}}`.
pub fn nest_at_path(path: &str, value: Value) -> Value {
    let mut nested = value;
    for segment in path.rsplit('.') {
        let mut branch = Map::new();
        branch.insert(segment.to_string(), nested);
        nested = Value::Object(branch);
    }
    nested
}

/// Deep-merge `incoming` into `target`
///
/// Mappings merge key-by-key, colliding lists concatenate, and anything
/// else is overwritten by the incoming value. List concatenation at the
/// leaves is what lets loop questions accumulate repeated entries instead
/// of replacing them.
pub fn merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(entries)) => {
            for (key, value) in entries {
                match existing.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(items)) => {
            existing.extend(items);
        }
        (target, incoming) => *target = incoming,
    }
}

/// Recursively prune empty values and trim strings
///
/// Children are normalized first; a child that ends up as an empty string,
/// empty list, or empty mapping is removed entirely. `false` and `null`
/// are kept. Emptiness is tested before trimming, so a string of only
/// whitespace survives (and is then trimmed), as the escape hatch for
/// intentionally blank values.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(entries) => {
            let mut out = Map::new();
            for (key, child) in entries {
                let normalized = normalize(child);
                if !is_empty(&normalized) {
                    out.insert(key.clone(), trimmed(normalized));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            let mut out = Vec::new();
            for child in items {
                let normalized = normalize(child);
                if !is_empty(&normalized) {
                    out.push(trimmed(normalized));
                }
            }
            Value::Array(out)
        }
        other => other.clone(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}

fn trimmed(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.trim().to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nest_at_path_builds_single_branch() {
        assert_eq!(
            nest_at_path("a.b.c", json!("x")),
            json!({"a": {"b": {"c": "x"}}})
        );
    }

    #[test]
    fn test_nest_at_path_single_segment() {
        assert_eq!(nest_at_path("key", json!(true)), json!({"key": true}));
    }

    #[test]
    fn test_merge_adds_sibling_keys() {
        let mut doc = json!({"site": {"email": {"admin": "a@x.com"}}});
        merge(&mut doc, json!({"site": {"email": {"sales": "s@x.com"}}}));
        assert_eq!(
            doc,
            json!({"site": {"email": {"admin": "a@x.com", "sales": "s@x.com"}}})
        );
    }

    #[test]
    fn test_merge_overwrites_scalar_leaves() {
        let mut doc = json!({"site": {"id": "old"}});
        merge(&mut doc, json!({"site": {"id": "new"}}));
        assert_eq!(doc, json!({"site": {"id": "new"}}));
    }

    #[test]
    fn test_merge_concatenates_list_leaves() {
        let mut doc = json!({"users": [{"name": "a"}]});
        merge(&mut doc, json!({"users": [{"name": "b"}]}));
        assert_eq!(doc, json!({"users": [{"name": "a"}, {"name": "b"}]}));
    }

    #[test]
    fn test_normalize_prunes_empty_values_transitively() {
        assert_eq!(normalize(&json!({"a": {"b": [""]}})), json!({}));
    }

    #[test]
    fn test_normalize_keeps_false_and_null() {
        let doc = json!({"active": false, "parent": null, "name": "x"});
        assert_eq!(normalize(&doc), doc);
    }

    #[test]
    fn test_normalize_trims_surviving_strings() {
        assert_eq!(
            normalize(&json!({"name": "  spaced  "})),
            json!({"name": "spaced"})
        );
    }

    #[test]
    fn test_normalize_preserves_whitespace_only_strings() {
        // "  " is not empty, so the key survives; the value is then trimmed.
        assert_eq!(normalize(&json!({"blank": "  "})), json!({"blank": ""}));
    }

    #[test]
    fn test_normalize_filters_list_elements() {
        assert_eq!(
            normalize(&json!(["keep", "", {"empty": {}}, false])),
            json!(["keep", false])
        );
    }
}
