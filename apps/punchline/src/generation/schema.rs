//! Routine output schema: what we ask the service for, and how we check what comes back.
//!
//! The declared schema is sent upstream as `responseSchema`. The response is then checked
//! structurally against the same shape before it becomes a typed `GeneratedRoutine`, so a
//! malformed payload fails with every violation listed instead of the first serde complaint.

use std::fmt;

use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::GeneratedRoutine;

const ROUTINE_STRING_FIELDS: &[&str] = &["opener", "closer"];
const BIT_STRING_FIELDS: &[&str] = &["title", "setup", "punchline", "actOut", "coachingTip"];

/// The `responseSchema` declaration for a routine, in Gemini's OpenAPI subset.
pub fn routine_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "opener": {
                "type": "STRING",
                "description": "A strong opening line to warm up the crowd."
            },
            "bits": {
                "type": "ARRAY",
                "description": "An array of exactly 10 comedy bits.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "INTEGER" },
                        "title": {
                            "type": "STRING",
                            "description": "A short snappy title for the bit"
                        },
                        "setup": {
                            "type": "STRING",
                            "description": "The premise or set up of the joke."
                        },
                        "punchline": {
                            "type": "STRING",
                            "description": "The payoff or funny conclusion."
                        },
                        "actOut": {
                            "type": "STRING",
                            "description": "Instructions for physical comedy, voice changes, or stage movement."
                        },
                        "coachingTip": {
                            "type": "STRING",
                            "description": "Expert advice on delivery, timing, or why this joke works for their persona."
                        }
                    },
                    "required": ["id", "title", "setup", "punchline", "actOut", "coachingTip"]
                }
            },
            "closer": {
                "type": "STRING",
                "description": "A final strong joke or call-back to end the set."
            }
        },
        "required": ["opener", "bits", "closer"]
    })
}

/// One place where a payload departs from the routine schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path of the offending value, e.g. `bits[2].punchline`.
    pub path: String,
    pub problem: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.problem)
    }
}

fn violation(path: impl Into<String>, problem: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        path: path.into(),
        problem: problem.into(),
    }
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

fn check_string(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    path: String,
    out: &mut Vec<SchemaViolation>,
) {
    match obj.get(key) {
        None => out.push(violation(path, "missing required field")),
        Some(Value::String(_)) => {}
        Some(other) => out.push(violation(
            path,
            format!("expected string, found {}", type_name(other)),
        )),
    }
}

/// Checks a parsed payload against the routine shape. Extra fields are allowed.
pub fn validate_routine_value(value: &Value) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec![violation(
            "$",
            format!("expected object, found {}", type_name(value)),
        )]);
    };

    for key in ROUTINE_STRING_FIELDS {
        check_string(root, key, key.to_string(), &mut violations);
    }

    match root.get("bits") {
        None => violations.push(violation("bits", "missing required field")),
        Some(Value::Array(bits)) => {
            for (i, bit) in bits.iter().enumerate() {
                let bit_path = format!("bits[{i}]");
                let Some(bit) = bit.as_object() else {
                    violations.push(violation(
                        bit_path,
                        format!("expected object, found {}", type_name(bit)),
                    ));
                    continue;
                };
                match bit.get("id") {
                    None => violations.push(violation(
                        format!("{bit_path}.id"),
                        "missing required field",
                    )),
                    Some(id) if id.as_i64().is_some() => {}
                    Some(other) => violations.push(violation(
                        format!("{bit_path}.id"),
                        format!("expected integer, found {other}"),
                    )),
                }
                for key in BIT_STRING_FIELDS {
                    check_string(bit, key, format!("{bit_path}.{key}"), &mut violations);
                }
            }
        }
        Some(other) => violations.push(violation(
            "bits",
            format!("expected array, found {}", type_name(other)),
        )),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Turns response text into a typed routine, or a `Parse` error naming what was wrong.
pub fn parse_routine(text: &str) -> Result<GeneratedRoutine, AppError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| AppError::Parse(format!("response is not valid JSON: {e}")))?;

    validate_routine_value(&value).map_err(|violations| {
        let listed: Vec<String> = violations.iter().map(ToString::to_string).collect();
        AppError::Parse(format!(
            "response does not match routine schema: {}",
            listed.join("; ")
        ))
    })?;

    serde_json::from_value(value)
        .map_err(|e| AppError::Parse(format!("routine decode failed: {e}")))
}
