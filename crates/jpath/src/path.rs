use crate::error::JPathError;
use serde_json::Value;

/// Splits a dotted path into segments, rejecting empty paths and empty segments.
pub fn parse_path(path: &str) -> Result<Vec<&str>, JPathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(JPathError::EmptyPath);
    }
    path.split('.')
        .enumerate()
        .map(|(position, segment)| {
            let segment = segment.trim();
            if segment.is_empty() {
                Err(JPathError::EmptySegment {
                    path: path.to_string(),
                    position,
                })
            } else {
                Ok(segment)
            }
        })
        .collect()
}

/// Walks `root` one segment at a time.
///
/// Objects are indexed by key and arrays by a numeric segment. The walk stops with
/// `Ok(None)` as soon as a segment is missing or the current value is null or a scalar.
/// A null leaf is reported as missing too. Only a malformed path is an error.
pub fn try_resolve<'a>(path: &str, root: &'a Value) -> Result<Option<&'a Value>, JPathError> {
    let segments = parse_path(path)?;
    let mut current = root;
    for segment in segments {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(Value::Null) | None => return Ok(None),
            Some(value) => current = value,
        }
    }
    Ok(Some(current))
}

/// Like [`try_resolve`], but a malformed path simply resolves to nothing.
pub fn resolve<'a>(path: &str, root: &'a Value) -> Option<&'a Value> {
    try_resolve(path, root).ok().flatten()
}

/// Resolves and stringifies; missing values become the empty string.
pub fn resolve_str(path: &str, root: &Value) -> String {
    resolve(path, root).map(stringify).unwrap_or_default()
}

/// Resolves a number, accepting numeric strings such as `"12.50"`.
pub fn resolve_f64(path: &str, root: &Value) -> Option<f64> {
    match resolve(path, root)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolves a sequence; anything else is treated as empty.
pub fn resolve_array<'a>(path: &str, root: &'a Value) -> &'a [Value] {
    resolve(path, root)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Renders a value the way it appears when spliced into text.
///
/// Strings are verbatim, integral floats drop their fraction, sequences are joined with
/// commas and mappings become compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
