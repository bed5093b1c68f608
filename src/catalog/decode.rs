//! Decoder for the INI dialect Postman writes under `.postman/`.
//!
//! Section headers nest on `.` (`[config.relations]` becomes
//! `{"config": {"relations": {}}}`), `key[] = value` appends to a list and
//! plain `key = value` assigns. The result is a `serde_json::Value` tree so
//! callers can walk it with the usual `get`/`pointer` helpers.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced while decoding a definition record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A line is neither a section header, a comment, nor an assignment.
    #[error("line {line}: expected `key = value` or `[section]`, found {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A section header or key collides with an existing non-map value.
    #[error("line {line}: `{key}` is already a value and cannot hold nested keys")]
    Conflict {
        /// 1-based line number.
        line: usize,
        /// The key path segment that collided.
        key: String,
    },
}

/// Decode INI text into a nested value tree.
///
/// # Errors
///
/// Returns a [`DecodeError`] for malformed lines or when a section path runs
/// through a key that already holds a scalar.
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    let mut root = Map::new();
    let mut section: Vec<String> = Vec::new();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        let header_line = if line.starts_with('[') { strip_inline_comment(line) } else { line };
        if let Some(header) = header_line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = split_section(header);
            // Materialize the section even if it ends up empty.
            descend(&mut root, &section, line_no)?;
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(DecodeError::MalformedLine { line: line_no, content: line.to_string() });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(DecodeError::MalformedLine { line: line_no, content: line.to_string() });
        }
        let value = parse_value(value.trim());
        let target = descend(&mut root, &section, line_no)?;

        if let Some(list_key) = key.strip_suffix("[]").map(str::trim_end) {
            let slot =
                target.entry(list_key.to_string()).or_insert_with(|| Value::Array(Vec::new()));
            match slot {
                Value::Array(items) => items.push(value),
                // A scalar assigned earlier is promoted to a list.
                other => {
                    let previous = other.take();
                    *other = Value::Array(vec![previous, value]);
                }
            }
        } else {
            target.insert(key.to_string(), value);
        }
    }

    Ok(Value::Object(root))
}

/// Split a section header on unescaped dots. `\.` keeps a literal dot.
fn split_section(header: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = header.trim().chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
}

/// Walk (creating as needed) the nested maps named by `path`.
fn descend<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
    line: usize,
) -> Result<&'a mut Map<String, Value>, DecodeError> {
    let mut current = root;
    for segment in path {
        let slot = current.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            _ => return Err(DecodeError::Conflict { line, key: segment.clone() }),
        };
    }
    Ok(current)
}

/// Interpret the right-hand side of an assignment.
fn parse_value(raw: &str) -> Value {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return serde_json::from_str::<String>(raw)
            .map_or_else(|_| Value::String(raw[1..raw.len() - 1].to_string()), Value::String);
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Value::String(raw[1..raw.len() - 1].to_string());
    }

    let raw = strip_inline_comment(raw);
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        other => Value::String(other.to_string()),
    }
}

/// Drop a trailing ` ;comment` or ` #comment`. Only whitespace-preceded
/// markers count, so JSON payloads and URLs with `#` survive.
fn strip_inline_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b';' || b == b'#') && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return raw[..i].trim_end();
        }
    }
    raw
}
