//! Dashboard facet filters
//!
//! The host forwards the dashboard's filter list untouched next to the
//! webapp configuration. Filters are applied to the built table, one after
//! the other, before it is rendered.

pub mod date;
pub mod facet;

pub use date::*;
pub use facet::*;

use crate::config::json_type_name;
use crate::data::ChartTable;
use crate::error::ChartError;
use crate::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Parse the raw `filters` payload. `null` means no filters.
pub fn parse_filters(raw: &Value) -> Result<Vec<Filter>> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => Vec::<Filter>::deserialize(raw)
            .map_err(|e| ChartError::InvalidFilters(e.to_string())),
        other => Err(ChartError::InvalidFilters(format!(
            "expected a list of filters, got {}",
            json_type_name(other)
        ))),
    }
}

/// Apply every filter in order.
///
/// Fails if filtering removed every row of a table that had some.
pub fn apply_filters(mut table: ChartTable, filters: &[Filter]) -> Result<ChartTable> {
    let before = table.len();
    let mut applied = 0;

    for filter in filters {
        if filter.apply(&mut table)? {
            applied += 1;
        }
    }

    debug!(before, after = table.len(), applied, "filters applied");

    if applied > 0 && before > 0 && table.is_empty() {
        return Err(ChartError::EmptyAfterFilter);
    }
    Ok(table)
}
