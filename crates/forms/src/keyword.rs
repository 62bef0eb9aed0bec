//! Keyword field values.
//!
//! A keyword value is a list of tags. On the form it is edited as a single
//! comma separated string, so binding splits and rendering joins.

use regex::Regex;
use serde_json::Value as Json;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Split `"rust, cms ,  forms"` into `["rust", "cms", "forms"]`.
/// Empty entries are dropped.
pub fn keywords_from_str(raw: &str) -> Vec<String> {
    SEPARATOR
        .split(raw.trim())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn keywords_to_string<S: AsRef<str>>(keywords: &[S]) -> String {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Submitted input → stored value (JSON array of strings).
pub fn reverse_transform(raw: &Json) -> Json {
    match raw {
        Json::String(s) => Json::from(keywords_from_str(s)),
        Json::Array(items) => Json::from(
            items
                .iter()
                .filter_map(Json::as_str)
                .flat_map(keywords_from_str)
                .collect::<Vec<_>>(),
        ),
        Json::Null => Json::Array(Vec::new()),
        other => Json::from(keywords_from_str(&other.to_string())),
    }
}

/// Stored value → display string.
pub fn transform(value: &Json) -> Json {
    match value {
        Json::Array(items) => {
            let words: Vec<&str> = items.iter().filter_map(Json::as_str).collect();
            Json::String(keywords_to_string(&words))
        }
        Json::Null => Json::String(String::new()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            keywords_from_str("  rust, cms ,forms,, "),
            vec!["rust", "cms", "forms"]
        );
        assert!(keywords_from_str("   ").is_empty());
        assert_eq!(keywords_from_str("single"), vec!["single"]);
    }

    #[test]
    fn joins_with_comma_space() {
        assert_eq!(keywords_to_string(&["a", "b"]), "a, b");
        assert_eq!(keywords_to_string::<&str>(&[]), "");
    }

    #[test]
    fn reverse_transform_accepts_string_list_and_null() {
        assert_eq!(reverse_transform(&json!("a, b")), json!(["a", "b"]));
        assert_eq!(reverse_transform(&json!(["a", "b, c"])), json!(["a", "b", "c"]));
        assert_eq!(reverse_transform(&Json::Null), json!([]));
    }

    #[test]
    fn transform_renders_list_as_string() {
        assert_eq!(transform(&json!(["x", "y"])), json!("x, y"));
        assert_eq!(transform(&Json::Null), json!(""));
    }
}
