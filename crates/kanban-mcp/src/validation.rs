//! Input validation at the tool boundary.
//!
//! Each tool's arguments are checked against the JSON Schema generated from its
//! request type before the handler runs. Failures name the offending field so
//! the caller can fix the call without reading the source.

use jsonschema::{error::ValidationErrorKind, Draft, JSONSchema};
use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Draft-07 schema for `T` with every subschema inlined, so the result is a
/// self-contained object that external callers can read as is.
pub fn schema_for<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();
    serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}

/// One reason an argument object was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path to the field, or `(root)` for the argument object itself
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub tool: String,
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn single(tool: &str, field: &str, reason: impl Into<String>) -> Self {
        Self {
            tool: tool.to_string(),
            issues: vec![FieldIssue {
                field: field.to_string(),
                reason: reason.into(),
            }],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.reason))
            .collect();
        write!(f, "invalid input for '{}': {}", self.tool, issues.join("; "))
    }
}

pub const ROOT_FIELD: &str = "(root)";

/// Compiled schema for one tool's input.
pub struct InputValidator {
    tool: String,
    schema: Value,
    compiled: JSONSchema,
}

impl InputValidator {
    pub fn for_request<T: JsonSchema>(tool: &str) -> Result<Self, String> {
        Self::from_schema(tool, schema_for::<T>())
    }

    pub fn from_schema(tool: &str, schema: Value) -> Result<Self, String> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| format!("failed to compile schema for '{}': {}", tool, e))?;
        Ok(Self {
            tool: tool.to_string(),
            schema,
            compiled,
        })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn validate(&self, args: &Value) -> Result<(), ValidationFailure> {
        let result = self.compiled.validate(args);
        if let Err(errors) = result {
            let issues = errors
                .map(|e| {
                    let field = match &e.kind {
                        ValidationErrorKind::Required { property } => property
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| property.to_string()),
                        _ => field_name(&e.instance_path.to_string()),
                    };
                    FieldIssue {
                        field,
                        reason: e.to_string(),
                    }
                })
                .collect();
            return Err(ValidationFailure {
                tool: self.tool.clone(),
                issues,
            });
        }
        Ok(())
    }
}

/// `/labels/0` becomes `labels.0`.
fn field_name(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        ROOT_FIELD.to_string()
    } else {
        trimmed.replace('/', ".")
    }
}
