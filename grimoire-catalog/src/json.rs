//! JSON column shaping.
//!
//! Write side: every JSON-bearing CSV field is parsed and re-serialized, with a
//! type-appropriate empty value standing in for blank or malformed input.
//! Read side: stored columns are decoded leniently into typed content.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::types::{MonsterLink, MonsterSection, SectionEntry};

/// Empty value used when a JSON column is blank or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFallback {
    /// `[]`
    EmptyArray,
    /// `{}`
    EmptyObject,
}

impl JsonFallback {
    fn as_str(self) -> &'static str {
        match self {
            JsonFallback::EmptyArray => "[]",
            JsonFallback::EmptyObject => "{}",
        }
    }
}

/// Parse `raw` and re-serialize it compactly, or return the fallback.
///
/// ```
/// use grimoire_catalog::{JsonFallback, normalize_json};
///
/// assert_eq!(normalize_json(r#"[ "a" , "b" ]"#, JsonFallback::EmptyArray), r#"["a","b"]"#);
/// assert_eq!(normalize_json("{not json", JsonFallback::EmptyArray), "[]");
/// assert_eq!(normalize_json("", JsonFallback::EmptyObject), "{}");
/// ```
pub fn normalize_json(raw: &str, fallback: JsonFallback) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback.as_str().to_string();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => value.to_string(),
        Err(_) => fallback.as_str().to_string(),
    }
}

fn parse_column(raw: Option<&str>) -> Value {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(Value::Null)
}

/// Render a scalar the way a loosely-typed client would: strings unquoted,
/// null as empty, everything else as its JSON text.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str, default: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => value_to_string(value),
    }
}

/// Decode a translation list: non-empty strings only.
pub fn decode_translations(raw: Option<&str>) -> Vec<String> {
    match parse_column(raw) {
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode the free-form details map, stringifying every value.
pub fn decode_details(raw: Option<&str>) -> BTreeMap<String, String> {
    match parse_column(raw) {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), value_to_string(v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Decode stat block sections. Non-object items are dropped; missing fields
/// take their defaults.
pub fn decode_sections(raw: Option<&str>) -> Vec<MonsterSection> {
    let Value::Array(items) = parse_column(raw) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|section| {
            let entries = section
                .get("entries")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(Value::as_object)
                        .map(|entry| SectionEntry {
                            kind: string_field(entry, "kind", "paragraph"),
                            name: string_field(entry, "name", ""),
                            text: string_field(entry, "text", ""),
                        })
                        .collect()
                })
                .unwrap_or_default();
            MonsterSection {
                title: string_field(section, "title", "Section"),
                entries,
            }
        })
        .collect()
}

/// Decode the link list.
pub fn decode_links(raw: Option<&str>) -> Vec<MonsterLink> {
    let Value::Array(items) = parse_column(raw) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|link| MonsterLink {
            href: string_field(link, "href", ""),
            text: string_field(link, "text", ""),
        })
        .collect()
}

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("static pattern"));

/// Split a raw translation string such as `"[Goblin] [Gobelin]"` into its
/// bracketed parts. Text without brackets is a single translation.
pub fn parse_translation_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    let parts: Vec<String> = BRACKETED
        .captures_iter(raw)
        .map(|c| c[1].split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() && !BRACKETED.is_match(raw) {
        vec![raw.to_string()]
    } else {
        parts
    }
}
