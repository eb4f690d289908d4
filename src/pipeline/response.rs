//! Response interpretation: status + body → fields or error.
//!
//! Branches are checked in a fixed order:
//!
//! 1. status outside 200–299 → [`ExtractError::HttpStatus`]; the body is ignored
//! 2. body is not JSON, or is JSON `null` → [`ExtractError::MalformedResponse`]
//! 3. truthy `error` key → [`ExtractError::Service`]
//! 4. otherwise the six fields, each coerced to a string or left empty
//!
//! Values are coerced the way a form input would display them: strings as-is,
//! numbers in shortest decimal form, and falsy values (`null`, `false`, `0`,
//! `""`) as the empty string.

use crate::error::ExtractError;
use crate::fields::{DocumentField, ExtractedFields};
use reqwest::StatusCode;
use serde_json::Value;

/// Interpret a raw response from the extraction service.
///
/// `endpoint` is only used to label a status error. [`post_upload`] already
/// rejects non-success statuses; the check here covers callers that build a
/// status and body some other way.
///
/// [`post_upload`]: crate::pipeline::request::post_upload
pub fn interpret(
    endpoint: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<ExtractedFields, ExtractError> {
    check_status(endpoint, status)?;
    let data = parse_body(body)?;
    fields_from_value(&data)
}

/// Fail on any status outside 200–299.
pub fn check_status(endpoint: &str, status: StatusCode) -> Result<(), ExtractError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ExtractError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ExtractError> {
    let data: Value = serde_json::from_slice(body).map_err(|e| ExtractError::MalformedResponse {
        reason: e.to_string(),
    })?;
    if data.is_null() {
        return Err(ExtractError::MalformedResponse {
            reason: "response body is JSON null".to_string(),
        });
    }
    Ok(data)
}

/// Map a parsed response document onto the six fields.
///
/// Only objects carry keys; any other JSON value yields six empty fields.
pub fn fields_from_value(data: &Value) -> Result<ExtractedFields, ExtractError> {
    if let Some(error) = data.get("error").filter(|v| is_truthy(v)) {
        return Err(ExtractError::Service {
            message: display_value(error),
        });
    }

    let mut fields = ExtractedFields::new();
    for field in DocumentField::ALL {
        if let Some(value) = data.get(field.label()).filter(|v| is_truthy(v)) {
            fields.set(field, display_value(value));
        }
    }
    Ok(fields)
}

/// Truthiness of a JSON value: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a JSON value as display text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Integral floats print without a trailing ".0".
        Some(f) if f != 0.0 && (f.abs() >= 1e21 || f.abs() < 1e-6) => exponential(f),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Shortest exponential form with an explicit exponent sign: `1e+21`, `1.5e-7`.
fn exponential(f: f64) -> String {
    let s = format!("{:e}", f);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}
