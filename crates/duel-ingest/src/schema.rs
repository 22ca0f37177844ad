//! Structural validation of user exports
//!
//! The accepted shape is declared once as a JSON Schema (draft 7) and compiled into a
//! [`UserFileValidator`] at startup. Every object is closed (`additionalProperties:
//! false`) and both nested arrays hold exactly one element.
//!
//! Draft 7 `integer` rejects `5.0`, so callers run [`normalize_whole_numbers`] first.

use jsonschema::{Draft, Validator};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::whole_number;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to compile user file schema: {0}")]
    Compile(String),
}

/// One failed constraint, located by JSON pointer into the instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root) {}", self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// The JSON Schema every user export must satisfy
pub fn user_file_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "user_id": { "type": ["string", "null"] },
            "name": { "type": "string" },
            "email": { "type": "string" },
            "instagram_handle": { "type": ["string", "null"] },
            "tiktok_handle": { "type": "string" },
            "joined_at": { "type": "string" },
            "advocacy_programs": {
                "type": "array",
                "minItems": 1,
                "maxItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "program_id": { "type": "string" },
                        "brand": { "type": ["string", "integer"] },
                        "tasks_completed": {
                            "type": "array",
                            "minItems": 1,
                            "maxItems": 1,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "task_id": { "type": ["string", "null"] },
                                    "platform": { "type": ["string", "integer"] },
                                    "post_url": { "type": "string" },
                                    "likes": { "type": ["string", "integer"] },
                                    "comments": { "type": ["integer", "null"] },
                                    "shares": { "type": "integer" },
                                    "reach": { "type": "integer" }
                                },
                                "required": [
                                    "task_id", "platform", "post_url", "likes",
                                    "comments", "shares", "reach"
                                ],
                                "additionalProperties": false
                            }
                        },
                        "total_sales_attributed": { "type": ["string", "number"] }
                    },
                    "required": [
                        "program_id", "brand", "tasks_completed", "total_sales_attributed"
                    ],
                    "additionalProperties": false
                }
            }
        },
        "required": [
            "user_id", "name", "email", "instagram_handle",
            "tiktok_handle", "joined_at", "advocacy_programs"
        ],
        "additionalProperties": false
    })
}

/// Rewrite whole-valued floats (`40.0`) as integers, recursively
pub fn normalize_whole_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(i) = whole_number(n) {
                *n = i.into();
            }
        },
        Value::Array(items) => items.iter_mut().for_each(normalize_whole_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_whole_numbers),
        _ => {},
    }
}

/// Compiled validator for [`user_file_schema`]
pub struct UserFileValidator {
    validator: Validator,
}

impl UserFileValidator {
    pub fn new() -> Result<Self, SchemaError> {
        Self::from_schema(&user_file_schema())
    }

    pub fn from_schema(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Collect every violation; an empty result means the value is well-formed
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<ValidationIssue>> {
        let issues: Vec<ValidationIssue> = self
            .validator
            .iter_errors(instance)
            .map(|err| ValidationIssue::new(err.instance_path.to_string(), err.to_string()))
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

impl std::fmt::Debug for UserFileValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserFileValidator").finish_non_exhaustive()
    }
}
