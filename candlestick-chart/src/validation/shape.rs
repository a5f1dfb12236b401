//! Candlestick configuration shape check

use crate::config::{json_type_name, WebAppConfig, REQUIRED_FIELDS};
use crate::error::{ChartError, ValidationError};
use crate::render::LibraryStatus;
use crate::Result;

/// Check that every required column is present as an array and that the
/// charting library has not failed to load.
///
/// Missing fields are reported in `open, close, low, high, timestamp` order.
/// A library that is still loading passes; the caller waits for it.
pub fn validate_config(config: &WebAppConfig, library: LibraryStatus) -> Result<()> {
    for field in REQUIRED_FIELDS {
        let value = match config.get(field) {
            Some(v) if !v.is_null() => v,
            _ => {
                return Err(ValidationError::MissingField {
                    field: field.to_string(),
                }
                .into())
            }
        };
        if !value.is_array() {
            return Err(ValidationError::NotAnArray {
                field: field.to_string(),
                found: json_type_name(value),
            }
            .into());
        }
    }

    if library == LibraryStatus::Unavailable {
        return Err(ChartError::DependencyUnavailable);
    }

    Ok(())
}
