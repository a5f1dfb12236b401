//! Parameter schema check

use crate::config::{json_type_name, WebAppConfig, WebAppDescriptor};
use crate::error::ValidationError;

/// A schema a webapp configuration must satisfy.
pub trait ParameterSchema {
    /// Check the configuration's shape and types
    fn validate_parameters(&self, config: &WebAppConfig) -> Result<(), ValidationError>;
}

impl ParameterSchema for WebAppDescriptor {
    fn validate_parameters(&self, config: &WebAppConfig) -> Result<(), ValidationError> {
        for param in &self.params {
            match config.get(&param.name) {
                None | Some(serde_json::Value::Null) => {
                    if param.mandatory {
                        return Err(ValidationError::MissingParameter {
                            name: param.name.clone(),
                        });
                    }
                }
                Some(value) => {
                    if !param.param_type.matches(value) {
                        return Err(ValidationError::WrongType {
                            name: param.name.clone(),
                            expected: param.param_type.name(),
                            found: json_type_name(value),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl<S: ParameterSchema + ?Sized> ParameterSchema for &S {
    fn validate_parameters(&self, config: &WebAppConfig) -> Result<(), ValidationError> {
        (**self).validate_parameters(config)
    }
}

impl<S: ParameterSchema + ?Sized> ParameterSchema for std::sync::Arc<S> {
    fn validate_parameters(&self, config: &WebAppConfig) -> Result<(), ValidationError> {
        (**self).validate_parameters(config)
    }
}

/// Validate a configuration against a schema
pub fn validate_parameters<S: ParameterSchema + ?Sized>(
    config: &WebAppConfig,
    schema: &S,
) -> Result<(), ValidationError> {
    schema.validate_parameters(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParamDescriptor, ParamType};
    use serde_json::json;

    fn config(value: serde_json::Value) -> WebAppConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_descriptor_accepts_complete_config() {
        let cfg = config(json!({
            "open": ["1"], "close": ["1"], "low": ["1"], "high": ["1"], "timestamp": ["2024-01-01"]
        }));
        assert!(validate_parameters(&cfg, &WebAppDescriptor::candlestick()).is_ok());
    }

    #[test]
    fn test_descriptor_reports_missing_mandatory() {
        let cfg = config(json!({"open": ["1"], "close": null}));
        let err = WebAppDescriptor::candlestick()
            .validate_parameters(&cfg)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParameter {
                name: "close".to_string()
            }
        );
    }

    #[test]
    fn test_descriptor_reports_wrong_type() {
        let descriptor = WebAppDescriptor::new(vec![
            ParamDescriptor::new("title", ParamType::String, false),
            ParamDescriptor::new("open", ParamType::Array, true),
        ]);
        let err = descriptor
            .validate_parameters(&config(json!({"title": 3, "open": []})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                name: "title".to_string(),
                expected: "string",
                found: "number",
            }
        );

        // optional params may be absent
        assert!(descriptor
            .validate_parameters(&config(json!({"open": []})))
            .is_ok());
    }
}
