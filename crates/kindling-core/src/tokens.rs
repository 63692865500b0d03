//! Stored answer tokens and `%name%` placeholder substitution

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Named answer values collected during the interview
///
/// Tokens are written by `store` actions and consumed when later action
/// values are substituted. Later writes under the same name overwrite
/// earlier ones; the store lives for exactly one run.
#[derive(Debug, Default)]
pub struct TokenStore {
    values: HashMap<String, String>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every `%name%` occurrence (name = one or more non-`%`
    /// characters) with the stored value, or the empty string when the name
    /// is unknown. Single left-to-right pass: substituted output is not
    /// re-scanned, so token values containing further markers are emitted
    /// verbatim.
    pub fn substitute_str(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(0) => {
                    // `%%` is not a marker; emit the first `%` and let the
                    // second one open a new candidate.
                    out.push('%');
                    rest = after;
                }
                Some(end) => {
                    if let Some(value) = self.values.get(&after[..end]) {
                        out.push_str(value);
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    // Unterminated marker, keep the tail as-is.
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Recursively substitute tokens throughout a JSON value
    ///
    /// Strings are substituted, lists and mappings are rebuilt with every
    /// element substituted, and all other scalars are returned unchanged.
    pub fn substitute(&self, value: &Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.substitute_str(text)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.substitute(v)).collect()),
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, v)| (key.clone(), self.substitute(v)))
                    .collect::<Map<String, Value>>(),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> TokenStore {
        let mut tokens = TokenStore::new();
        tokens.set("name", "example");
        tokens.set("greeting", "hello %name%");
        tokens
    }

    #[test]
    fn test_substitute_known_token() {
        assert_eq!(store().substitute_str("id-%name%-suffix"), "id-example-suffix");
    }

    #[test]
    fn test_substitute_unknown_token_becomes_empty() {
        assert_eq!(store().substitute_str("a%missing%b"), "ab");
    }

    #[test]
    fn test_substituted_output_is_not_rescanned() {
        // The value of %greeting% itself contains a marker; a single pass
        // must leave it alone.
        assert_eq!(store().substitute_str("%greeting%"), "hello %name%");
    }

    #[test]
    fn test_substitute_is_idempotent_without_markers() {
        let tokens = store();
        let once = tokens.substitute_str("plain example text");
        assert_eq!(tokens.substitute_str(&once), once);
    }

    #[test]
    fn test_unterminated_marker_is_preserved() {
        assert_eq!(store().substitute_str("100% done"), "100% done");
    }

    #[test]
    fn test_substitute_recurses_into_collections() {
        let tokens = store();
        let value = json!({
            "site": {"id": "%name%"},
            "list": ["%name%", 7, true],
        });
        assert_eq!(
            tokens.substitute(&value),
            json!({
                "site": {"id": "example"},
                "list": ["example", 7, true],
            })
        );
    }
}
