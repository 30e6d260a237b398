//! Structured-output schema descriptor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `response_format` object describing the expected JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Always `"json_schema"`.
    #[serde(rename = "type")]
    pub format_type: String,
    /// The schema definition.
    pub json_schema: JsonSchemaSpec,
}

/// Named JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaSpec {
    /// Schema name.
    pub name: String,
    /// JSON Schema object.
    pub schema: Value,
    /// Strict mode flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl ResponseFormat {
    /// Builds a `json_schema` response format.
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaSpec {
                name: name.into(),
                schema,
                strict: None,
            },
        }
    }

    /// Property names declared at the top level of the schema.
    pub fn property_names(&self) -> Vec<&str> {
        self.json_schema
            .schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for ResponseFormat {
    type Err = crate::error::DocAiError;

    /// Parses leniently through the repair stages.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::repair::parse_response_format(s)
    }
}
