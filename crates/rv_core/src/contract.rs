//! Pulling structured answers out of free-form model text.
//!
//! Models are asked to reply with bare JSON but routinely wrap it in a
//! markdown fence. Everything that does not parse into the expected shape
//! comes back as [`Error::ContractViolation`], never as a generic parse error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::{Error, Result};

/// Removes ```` ```json ```` and ```` ``` ```` fence markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parses the (fence-stripped) model text as JSON.
pub fn parse_payload(text: &str) -> Result<Value> {
    let stripped = strip_code_fences(text);
    if stripped.is_empty() {
        return Err(Error::contract("model returned an empty answer"));
    }
    serde_json::from_str(&stripped)
        .map_err(|e| Error::contract(format!("model answer is not valid JSON: {}", e)))
}

/// Parses the model text and requires a top-level JSON array.
pub fn parse_array(text: &str) -> Result<Vec<Value>> {
    match parse_payload(text)? {
        Value::Array(items) => Ok(items),
        other => Err(Error::contract(format!("expected a JSON array, got {}", kind(&other)))),
    }
}

/// Parses the model text straight into `T`.
pub fn parse_as<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    let value = parse_payload(text)?;
    serde_json::from_value(value)
        .map_err(|e| Error::contract(format!("model answer is not a valid {}: {}", what, e)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
