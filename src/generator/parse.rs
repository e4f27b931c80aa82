//! Parsing of model replies into notes.

use crate::error::{NotesError, Result};
use crate::note::{MarkdownNote, Quote, SectionContent};
use serde_json::{Map, Value};
use tracing::debug;

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_TIMESTAMP: &str = "00:00";

/// Locate the first balanced `{...}` object in `text`.
///
/// Braces inside JSON string literals are ignored, so prose around the
/// object and braces within its strings do not confuse the scan.
pub fn find_json_object(text: &str) -> Option<&str> {
    text.match_indices('{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

/// Byte length of the balanced object at the start of `text`, if it closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a model reply into a validated note for `source_url`.
///
/// Missing optional fields fall back to defaults; missing required lists
/// end up empty and are then rejected as `InvalidNote`.
pub fn parse_note(reply: &str, source_url: &str) -> Result<MarkdownNote> {
    let candidate = find_json_object(reply).unwrap_or(reply).trim();
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| NotesError::InvalidResponse(format!("reply is not valid JSON: {}", e)))?;
    let data = value
        .as_object()
        .ok_or_else(|| NotesError::InvalidResponse("reply is not a JSON object".to_string()))?;

    let title = data
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);

    let note = MarkdownNote::new(
        title,
        source_url,
        string_list(data, "tldr")?,
        string_list(data, "key_points")?,
        string_list(data, "outline")?,
    )?;

    Ok(note
        .with_quotes(quotes(data))
        .with_sections(sections(data)))
}

fn string_list(data: &Map<String, Value>, field: &str) -> Result<Vec<String>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().filter_map(item_text).collect()),
        Some(_) => Err(NotesError::InvalidResponse(format!(
            "field '{}' must be a list",
            field
        ))),
    }
}

/// Text of a list item; null and blank items are skipped.
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn quotes(data: &Map<String, Value>) -> Vec<Quote> {
    let Some(entries) = data.get("quotes").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let text = entry
                .get("text")
                .and_then(Value::as_str)
                .filter(|t| !t.trim().is_empty());
            let Some(text) = text else {
                debug!("Dropping malformed quote: {}", entry);
                return None;
            };
            let timestamp = entry
                .get("timestamp")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_TIMESTAMP);
            Some(Quote::new(text, timestamp))
        })
        .collect()
}

fn sections(data: &Map<String, Value>) -> Vec<(String, SectionContent)> {
    let Some(sections) = data.get("additional_sections").and_then(Value::as_object) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter_map(|(name, value)| {
            let content = match value {
                Value::Null => return None,
                Value::Array(items) => {
                    SectionContent::Items(items.iter().filter_map(item_text).collect())
                }
                Value::String(text) => SectionContent::Text(text.clone()),
                other => SectionContent::Text(other.to_string()),
            };
            Some((name.clone(), content))
        })
        .collect()
}
