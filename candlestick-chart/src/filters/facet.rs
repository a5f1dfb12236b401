//! Facet filter definitions

use crate::data::{ChartTable, Row};
use crate::error::ChartError;
use crate::filters::DatePart;
use crate::Result;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Key the host uses for "no value" in an exclusion list
pub const NO_VALUE_KEY: &str = "___dku_no_value___";

/// One dashboard filter, tagged by `filterType`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "filterType")]
pub enum Filter {
    /// Keep values inside `[minValue, maxValue]`
    #[serde(rename = "NUMERICAL_FACET", rename_all = "camelCase")]
    Numerical {
        column: String,
        #[serde(default)]
        min_value: Option<f64>,
        #[serde(default)]
        max_value: Option<f64>,
    },
    /// Drop values listed in `excludedValues`
    #[serde(rename = "ALPHANUM_FACET", rename_all = "camelCase")]
    Alphanum {
        column: String,
        #[serde(default)]
        column_type: Option<String>,
        #[serde(default)]
        excluded_values: BTreeMap<String, bool>,
    },
    /// Timestamp range, or exclusion of date parts
    #[serde(rename = "DATE_FACET", rename_all = "camelCase")]
    Date {
        column: String,
        date_filter_type: String,
        #[serde(default)]
        min_value: Option<f64>,
        #[serde(default)]
        max_value: Option<f64>,
        #[serde(default)]
        excluded_values: BTreeMap<String, bool>,
    },
    /// Any other filter type; ignored
    #[serde(other)]
    Unsupported,
}

/// Table column a filter targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Timestamp,
    Value(&'static str),
}

impl Column {
    fn resolve(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Self::Timestamp),
            "low" => Some(Self::Value("low")),
            "open" => Some(Self::Value("open")),
            "close" => Some(Self::Value("close")),
            "high" => Some(Self::Value("high")),
            _ => None,
        }
    }
}

impl Filter {
    /// Column name, if the filter targets one
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Numerical { column, .. }
            | Self::Alphanum { column, .. }
            | Self::Date { column, .. } => Some(column),
            Self::Unsupported => None,
        }
    }

    /// Filter the table in place. Returns false for ignored filter types.
    pub fn apply(&self, table: &mut ChartTable) -> Result<bool> {
        let Some(name) = self.column() else {
            return Ok(false);
        };
        let column = Column::resolve(name)
            .ok_or_else(|| ChartError::filter(name, "unknown column"))?;

        match self {
            Self::Numerical {
                min_value,
                max_value,
                ..
            } => {
                let Column::Value(field) = column else {
                    return Err(ChartError::filter(name, "numerical filter on a date column"));
                };
                let (min, max) = (*min_value, *max_value);
                table.retain(|row| {
                    let v = value_of(row, field);
                    min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
                });
            }
            Self::Alphanum {
                excluded_values, ..
            } => {
                let excluded = excluded_keys(excluded_values);
                match column {
                    Column::Value(field) => {
                        let numbers = excluded
                            .iter()
                            .map(|k| {
                                k.trim().parse::<f64>().map_err(|_| {
                                    ChartError::filter(name, format!("'{}' is not a number", k))
                                })
                            })
                            .collect::<Result<Vec<f64>>>()?;
                        table.retain(|row| !numbers.contains(&value_of(row, field)));
                    }
                    Column::Timestamp => {
                        table.retain(|row| !excluded.iter().any(|k| timestamp_matches(&row.timestamp, k)));
                    }
                }
            }
            Self::Date {
                date_filter_type,
                min_value,
                max_value,
                excluded_values,
                ..
            } => {
                if column != Column::Timestamp {
                    return Err(ChartError::filter(name, "date filter on a numeric column"));
                }
                if date_filter_type == "RANGE" {
                    let min = bound(name, *min_value)?;
                    let max = bound(name, *max_value)?;
                    table.retain(|row| {
                        min.map_or(true, |m| row.timestamp >= m)
                            && max.map_or(true, |m| row.timestamp <= m)
                    });
                } else {
                    let part = DatePart::parse(date_filter_type)
                        .map_err(|reason| ChartError::filter(name, reason))?;
                    let excluded = part
                        .excluded(excluded_keys(excluded_values))
                        .map_err(|reason| ChartError::filter(name, reason))?;
                    if !excluded.is_empty() {
                        table.retain(|row| !excluded.contains(&part.of(&row.timestamp)));
                    }
                }
            }
            Self::Unsupported => return Ok(false),
        }
        Ok(true)
    }
}

fn value_of(row: &Row, field: &str) -> f64 {
    row.value(field).unwrap_or(f64::NAN)
}

/// Keys flagged `true`, minus the no-value marker (rows always have values).
fn excluded_keys(values: &BTreeMap<String, bool>) -> Vec<&str> {
    values
        .iter()
        .filter(|(k, excluded)| **excluded && k.as_str() != NO_VALUE_KEY)
        .map(|(k, _)| k.as_str())
        .collect()
}

fn timestamp_matches(ts: &DateTime<Utc>, key: &str) -> bool {
    ts.format("%Y-%m-%d").to_string() == key
        || ts.to_rfc3339_opts(SecondsFormat::Millis, true) == key
        || ts.to_rfc3339_opts(SecondsFormat::Secs, true) == key
}

fn bound(column: &str, millis: Option<f64>) -> Result<Option<DateTime<Utc>>> {
    millis
        .map(|ms| {
            Utc.timestamp_millis_opt(ms as i64)
                .single()
                .ok_or_else(|| ChartError::filter(column, format!("{} is not a valid timestamp", ms)))
        })
        .transpose()
}
