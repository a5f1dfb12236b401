//! Webapp descriptor: the schema a configuration is checked against

use crate::config::REQUIRED_FIELDS;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a webapp parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamType {
    Array,
    String,
    Number,
    Boolean,
    Object,
    #[default]
    Any,
}

impl ParamType {
    /// Check whether a raw value has this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default)]
    pub mandatory: bool,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, param_type: ParamType, mandatory: bool) -> Self {
        Self {
            name: name.into(),
            param_type,
            mandatory,
        }
    }
}

/// Parameter schema supplied alongside the webapp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebAppDescriptor {
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl WebAppDescriptor {
    /// Create from a list of parameters
    pub fn new(params: Vec<ParamDescriptor>) -> Self {
        Self { params }
    }

    /// Descriptor of the candlestick webapp: five mandatory value arrays
    pub fn candlestick() -> Self {
        Self::new(
            REQUIRED_FIELDS
                .iter()
                .map(|name| ParamDescriptor::new(*name, ParamType::Array, true))
                .collect(),
        )
    }

    /// Parse a descriptor from its JSON form (`{"params": [...]}`)
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|e| ValidationError::InvalidDescriptor(e.to_string()))
    }

    /// Look up a declared parameter
    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }
}
