//! Row building: parallel host columns -> chart rows

use crate::config::{json_type_name, LengthPolicy, WebAppConfig};
use crate::data::{describe_value, to_date, to_number, ChartTable, Row};
use crate::error::{ChartError, ValidationError};
use crate::Result;
use serde_json::Value;
use tracing::debug;

/// Numeric columns, in the order they are checked.
const VALUE_COLUMNS: [&str; 4] = ["low", "open", "close", "high"];

/// Builds a [`ChartTable`] from a validated configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RowBuilder {
    policy: LengthPolicy,
}

struct Columns<'a> {
    timestamp: &'a [Value],
    low: &'a [Value],
    open: &'a [Value],
    close: &'a [Value],
    high: &'a [Value],
}

impl RowBuilder {
    /// Create a builder with the given length policy
    pub fn new(policy: LengthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Build one row per index of the configured columns.
    ///
    /// Lengths are checked before any cell is read. The configuration is
    /// left untouched.
    pub fn build(&self, config: &WebAppConfig) -> Result<ChartTable> {
        let columns = Columns {
            timestamp: column(config, "timestamp")?,
            low: column(config, "low")?,
            open: column(config, "open")?,
            close: column(config, "close")?,
            high: column(config, "high")?,
        };

        let n = self.row_count(&columns)?;
        debug!(rows = n, policy = %self.policy, "building chart rows");

        let mut table = ChartTable::with_capacity(n);
        for i in 0..n {
            table.push(Row::new(
                date_at("timestamp", columns.timestamp, i)?,
                number_at("low", columns.low, i)?,
                number_at("open", columns.open, i)?,
                number_at("close", columns.close, i)?,
                number_at("high", columns.high, i)?,
            ));
        }
        Ok(table)
    }

    fn row_count(&self, columns: &Columns<'_>) -> Result<usize> {
        let expected = columns.timestamp.len();
        let values = [columns.low, columns.open, columns.close, columns.high];

        match self.policy {
            LengthPolicy::Strict => {
                for (field, values) in VALUE_COLUMNS.iter().zip(values) {
                    if values.len() != expected {
                        return Err(ChartError::LengthMismatch {
                            field: field.to_string(),
                            expected,
                            actual: values.len(),
                        });
                    }
                }
                Ok(expected)
            }
            LengthPolicy::Truncate => Ok(values
                .iter()
                .map(|v| v.len())
                .fold(expected, usize::min)),
            LengthPolicy::TimestampDriven => Ok(expected),
        }
    }
}

/// Build rows with the default (strict) length policy
pub fn build_rows(config: &WebAppConfig) -> Result<ChartTable> {
    RowBuilder::default().build(config)
}

fn column<'a>(config: &'a WebAppConfig, field: &str) -> Result<&'a [Value]> {
    match config.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            field: field.to_string(),
        }
        .into()),
        Some(Value::Array(values)) => Ok(values),
        Some(other) => Err(ValidationError::NotAnArray {
            field: field.to_string(),
            found: json_type_name(other),
        }
        .into()),
    }
}

fn number_at(field: &str, values: &[Value], index: usize) -> Result<f64> {
    let raw = values.get(index);
    raw.and_then(to_number)
        .ok_or_else(|| coercion_error(field, index, raw, "number"))
}

fn date_at(field: &str, values: &[Value], index: usize) -> Result<chrono::DateTime<chrono::Utc>> {
    let raw = values.get(index);
    raw.and_then(to_date)
        .ok_or_else(|| coercion_error(field, index, raw, "date"))
}

fn coercion_error(field: &str, index: usize, raw: Option<&Value>, target: &'static str) -> ChartError {
    ChartError::Coercion {
        field: field.to_string(),
        index,
        value: raw.map_or_else(|| "missing".to_string(), describe_value),
        target,
    }
}
