//! Parse and validate generated verification output
//!
//! Deserialization and field validation happen in one pass over the JSON value
//! so that every problem is reported with its path. Nothing is coerced except
//! integral floats such as `85.0` on the 0-100 scales.

use crate::error::VerifierError;
use crate::types::{CitedSource, VerificationResult};
use factline_domain::schema::describe_value;
use factline_domain::{ClaimStatus, SchemaViolation, Score, Stance};
use serde_json::{Map, Value};

const SCORE_RANGE: &str = "integer in 0..=100";

/// Parse the service's JSON response into a validated verdict
pub fn parse_verification_response(response: &str) -> Result<VerificationResult, VerifierError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))
        .map_err(|e| VerifierError::Schema(vec![SchemaViolation::from_parse_error(&e)]))?;

    let Value::Object(obj) = &json else {
        return Err(VerifierError::Schema(vec![SchemaViolation::new(
            "$",
            "object",
            type_name(&json),
        )]));
    };

    let mut v = Validator::default();
    let status = v.status(obj.get("status"));
    let confidence = v.score(obj.get("confidence"), "confidence".to_string());
    let explanation = v.required_string(obj.get("explanation"), "explanation".to_string(), false);
    let suggested_fix = v.optional_string(obj.get("suggestedFix"), "suggestedFix");
    let cited_sources = v.cited_sources(obj.get("citedSources"));

    if status == Some(ClaimStatus::Contradicted) && suggested_fix.is_none() {
        v.push("suggestedFix", "non-empty string when status is contradicted", "missing");
    }

    match (status, confidence, explanation, cited_sources) {
        (Some(status), Some(confidence), Some(explanation), Some(cited_sources))
            if v.violations.is_empty() =>
        {
            Ok(VerificationResult {
                status,
                confidence,
                explanation,
                suggested_fix,
                cited_sources,
            })
        }
        _ => Err(VerifierError::Schema(v.violations)),
    }
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            body.trim_end().strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<SchemaViolation>,
}

impl Validator {
    fn push(&mut self, path: impl Into<String>, expected: &str, actual: impl Into<String>) {
        self.violations.push(SchemaViolation::new(path, expected, actual));
    }

    fn status(&mut self, value: Option<&Value>) -> Option<ClaimStatus> {
        const EXPECTED: &str = "one of supported, contradicted, debated, insufficient information";
        match value {
            Some(Value::String(s)) => {
                match serde_json::from_value::<ClaimStatus>(Value::String(s.clone())) {
                    Ok(status) if status.is_terminal() => Some(status),
                    _ => {
                        self.push("status", EXPECTED, describe_value(s));
                        None
                    }
                }
            }
            other => {
                self.push("status", EXPECTED, actual(other));
                None
            }
        }
    }

    fn score(&mut self, value: Option<&Value>, path: String) -> Option<Score> {
        match value {
            Some(Value::Number(n)) => {
                let parsed = n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .ok_or(())
                    .and_then(|f| Score::from_f64(f).map_err(|_| ()));
                match parsed {
                    Ok(score) => Some(score),
                    Err(()) => {
                        self.push(path, SCORE_RANGE, n.to_string());
                        None
                    }
                }
            }
            other => {
                self.push(path, SCORE_RANGE, actual(other));
                None
            }
        }
    }

    fn required_string(&mut self, value: Option<&Value>, path: String, allow_empty: bool) -> Option<String> {
        let expected = if allow_empty { "string" } else { "non-empty string" };
        match value {
            Some(Value::String(s)) if allow_empty || !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(s)) => {
                self.push(path, expected, describe_value(s));
                None
            }
            other => {
                self.push(path, expected, actual(other));
                None
            }
        }
    }

    fn optional_string(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(path, "string or null", type_name(other));
                None
            }
        }
    }

    fn source_number(&mut self, value: Option<&Value>, path: String) -> Option<u32> {
        const EXPECTED: &str = "integer >= 1";
        match value {
            Some(Value::Number(n)) => match n.as_u64().and_then(|u| u32::try_from(u).ok()) {
                Some(u) if u >= 1 => Some(u),
                _ => {
                    self.push(path, EXPECTED, n.to_string());
                    None
                }
            },
            other => {
                self.push(path, EXPECTED, actual(other));
                None
            }
        }
    }

    fn stance(&mut self, value: Option<&Value>, path: String) -> Option<Stance> {
        const EXPECTED: &str = "one of support, contradict, not relevant, unclear";
        match value {
            Some(Value::String(s)) => match serde_json::from_value::<Stance>(Value::String(s.clone())) {
                Ok(stance) => Some(stance),
                Err(_) => {
                    self.push(path, EXPECTED, describe_value(s));
                    None
                }
            },
            other => {
                self.push(path, EXPECTED, actual(other));
                None
            }
        }
    }

    fn cited_sources(&mut self, value: Option<&Value>) -> Option<Vec<CitedSource>> {
        let items = match value {
            Some(Value::Array(items)) => items,
            other => {
                self.push("citedSources", "array", actual(other));
                return None;
            }
        };

        let mut cited = Vec::with_capacity(items.len());
        let mut complete = true;
        for (idx, item) in items.iter().enumerate() {
            let path = format!("citedSources[{}]", idx);
            match item {
                Value::Object(obj) => match self.cited_source(obj, &path) {
                    Some(source) => cited.push(source),
                    None => complete = false,
                },
                other => {
                    self.push(path, "object", type_name(other));
                    complete = false;
                }
            }
        }
        complete.then_some(cited)
    }

    fn cited_source(&mut self, obj: &Map<String, Value>, path: &str) -> Option<CitedSource> {
        let field = |name: &str| format!("{}.{}", path, name);
        let source_number = self.source_number(obj.get("sourceNumber"), field("sourceNumber"));
        let stance = self.stance(obj.get("stance"), field("stance"));
        let agreement = self.score(obj.get("agreementPercentage"), field("agreementPercentage"));
        let pertinence = self.score(obj.get("pertinence"), field("pertinence"));
        let snippet = self.required_string(obj.get("relevantSnippet"), field("relevantSnippet"), true);

        Some(CitedSource {
            source_number: source_number?,
            stance: stance?,
            agreement_percentage: agreement?,
            pertinence: pertinence?,
            relevant_snippet: snippet?,
        })
    }
}

fn actual(value: Option<&Value>) -> String {
    value.map(type_name).unwrap_or("missing").to_string()
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
