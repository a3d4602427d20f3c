//! Structured-output contracts for the text-generation service
//!
//! A generation call carries a [`StructuredSchema`] (a named JSON Schema). The
//! consumer deserializes the returned text into a typed value and then runs field
//! validation; every problem found is reported as a [`SchemaViolation`].

use serde_json::Value;
use std::fmt;

/// A named JSON Schema describing the expected generation output
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredSchema {
    /// Short identifier, sent to providers that require a schema name
    pub name: String,

    /// The JSON Schema document
    pub schema: Value,
}

impl StructuredSchema {
    /// Create a schema
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// One field-level mismatch between generated output and its contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location of the field, e.g. `citedSources[1].pertinence` (`$` for the root)
    pub path: String,

    /// What the contract requires
    pub expected: String,

    /// What the output contained
    pub actual: String,
}

impl SchemaViolation {
    /// Create a violation
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Violation for output that could not be deserialized at all
    pub fn from_parse_error(err: &serde_json::Error) -> Self {
        Self::new(
            "$",
            "output matching the schema",
            format!("{} (line {}, column {})", err, err.line(), err.column()),
        )
    }

    /// Render a list of violations as one diagnostic, one violation per line
    pub fn describe_all(violations: &[SchemaViolation]) -> String {
        violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Short rendering of a value for diagnostics
pub fn describe_value(value: &str) -> String {
    const LIMIT: usize = 60;
    if value.is_empty() {
        return "empty string".to_string();
    }
    if value.chars().count() <= LIMIT {
        return format!("{:?}", value);
    }
    let head: String = value.chars().take(LIMIT).collect();
    format!("{:?}...", head)
}
