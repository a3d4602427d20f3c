//! Parse generated output into extracted claims
//!
//! Parsing is strict: every field-level problem is collected as a
//! [`SchemaViolation`] and the whole response is rejected if any are found.

use crate::error::ExtractorError;
use factline_domain::schema::describe_value;
use factline_domain::{ExtractedClaim, SchemaViolation};
use serde_json::{Map, Value};

const FIELDS: [&str; 3] = ["claim", "exactText", "searchQuery"];

/// Parse the service's JSON response into extracted claims
///
/// Accepts the schema's `{"claims": [...]}` object as well as a bare array,
/// optionally wrapped in a Markdown code fence.
pub fn parse_extraction_response(response: &str) -> Result<Vec<ExtractedClaim>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::Schema(vec![SchemaViolation::from_parse_error(&e)]))?;

    let (items, prefix) = match &json {
        Value::Array(items) => (items, "$"),
        Value::Object(obj) => match obj.get("claims") {
            Some(Value::Array(items)) => (items, "claims"),
            Some(other) => {
                return Err(ExtractorError::Schema(vec![SchemaViolation::new(
                    "claims",
                    "array",
                    type_name(other),
                )]))
            }
            None => {
                return Err(ExtractorError::Schema(vec![SchemaViolation::new(
                    "claims",
                    "array",
                    "missing",
                )]))
            }
        },
        other => {
            return Err(ExtractorError::Schema(vec![SchemaViolation::new(
                "$",
                "object with a claims array",
                type_name(other),
            )]))
        }
    };

    let mut violations = Vec::new();
    let mut claims = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let path = format!("{}[{}]", prefix, idx);
        match item {
            Value::Object(obj) => {
                if let Some(claim) = parse_claim_object(obj, &path, &mut violations) {
                    claims.push(claim);
                }
            }
            other => violations.push(SchemaViolation::new(path, "object", type_name(other))),
        }
    }

    if violations.is_empty() {
        Ok(claims)
    } else {
        Err(ExtractorError::Schema(violations))
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    // Drop the opening fence line (with any language tag) and the closing fence.
    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or("");
    let body = body.trim_end().strip_suffix("```").unwrap_or(body).trim();
    if body.is_empty() {
        return Err(ExtractorError::Schema(vec![SchemaViolation::new(
            "$",
            "JSON document",
            "empty code block",
        )]));
    }
    Ok(body)
}

fn parse_claim_object(
    obj: &Map<String, Value>,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<ExtractedClaim> {
    let before = violations.len();
    let mut values: [&str; 3] = [""; 3];

    for (slot, field) in values.iter_mut().zip(FIELDS) {
        let field_path = format!("{}.{}", path, field);
        match obj.get(field) {
            None => violations.push(SchemaViolation::new(field_path, "non-empty string", "missing")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                violations.push(SchemaViolation::new(field_path, "non-empty string", describe_value(s)))
            }
            Some(Value::String(s)) => *slot = s.as_str(),
            Some(other) => {
                violations.push(SchemaViolation::new(field_path, "non-empty string", type_name(other)))
            }
        }
    }

    if violations.len() > before {
        return None;
    }
    let [claim, exact_text, search_query] = values;
    Some(ExtractedClaim {
        claim: claim.to_string(),
        exact_text: exact_text.to_string(),
        search_query: search_query.to_string(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
