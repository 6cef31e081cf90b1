use serde_json::{Map, Value};

/// Remove an optional Markdown code fence (```json ... ``` or ``` ... ```)
/// around a model reply.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse a model reply into an untyped document.
pub fn parse_document(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fences(text))
}

/// Check that `document` is an object carrying every key in `fields`.
pub fn require_fields<'a>(document: &'a Value, fields: &[&str]) -> Result<&'a Map<String, Value>, String> {
    let object = document
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| !object.contains_key(*f))
        .collect();
    if missing.is_empty() {
        Ok(object)
    } else {
        Err(format!("Missing required fields in response: {}", missing.join(", ")))
    }
}
