use folio_jpath::resolve_str;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::borrow::Cow;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Returns a new tree in which every `{{path}}` marker inside a string scalar is replaced
/// by the stringified value found at `path` in `payload`, or by nothing when the path
/// does not resolve.
///
/// Mapping keys are left alone, as are numbers, booleans and nulls. Sequences and
/// mappings keep their order.
pub fn substitute(node: &Value, payload: &Value) -> Value {
    match node {
        Value::String(s) => match substitute_str(s, payload) {
            Cow::Borrowed(_) => node.clone(),
            Cow::Owned(replaced) => Value::String(replaced),
        },
        Value::Array(items) => Value::Array(items.iter().map(|n| substitute(n, payload)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute(v, payload)))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}

/// Substitutes the markers of a single string. Borrows when there is nothing to replace.
pub fn substitute_str<'a>(text: &'a str, payload: &Value) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        resolve_str(caps[1].trim(), payload)
    })
}

pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Lists the trimmed expressions of every marker in the tree, in document order.
pub fn placeholders(node: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect(node, &mut found);
    found
}

fn collect(node: &Value, found: &mut Vec<String>) {
    match node {
        Value::String(s) => found.extend(
            PLACEHOLDER
                .captures_iter(s)
                .map(|caps| caps[1].trim().to_string()),
        ),
        Value::Array(items) => items.iter().for_each(|n| collect(n, found)),
        Value::Object(map) => map.values().for_each(|n| collect(n, found)),
        _ => {}
    }
}

/// The expressions in `node` that do not resolve against `payload`.
pub fn unresolved(node: &Value, payload: &Value) -> Vec<String> {
    let mut missing: Vec<String> = placeholders(node)
        .into_iter()
        .filter(|expr| folio_jpath::resolve(expr, payload).is_none())
        .collect();
    missing.dedup();
    missing
}
