//! Candlestick rows and the table drawn from them

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One candlestick, in the column order the chart expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Start of the interval
    pub timestamp: DateTime<Utc>,
    /// Low price
    pub low: f64,
    /// Opening price
    pub open: f64,
    /// Closing price
    pub close: f64,
    /// High price
    pub high: f64,
}

impl Row {
    /// Create a new row
    pub fn new(timestamp: DateTime<Utc>, low: f64, open: f64, close: f64, high: f64) -> Self {
        Self {
            timestamp,
            low,
            open,
            close,
            high,
        }
    }

    /// Check if the bar is drawn with the rising color
    pub fn is_rising(&self) -> bool {
        self.close > self.open
    }

    /// Check if the bar is drawn with the falling color
    pub fn is_falling(&self) -> bool {
        self.close < self.open
    }

    /// Absolute difference between open and close
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// High minus low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Numeric column by name
    pub fn value(&self, column: &str) -> Option<f64> {
        match column {
            "low" => Some(self.low),
            "open" => Some(self.open),
            "close" => Some(self.close),
            "high" => Some(self.high),
            _ => None,
        }
    }

    /// `[timestamp, low, open, close, high]`
    pub fn to_data_row(&self) -> Value {
        json!([
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.low,
            self.open,
            self.close,
            self.high,
        ])
    }
}

/// Rows in input order. Temporal ordering is the caller's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartTable {
    rows: Vec<Row>,
}

impl ChartTable {
    /// Create new empty table
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create an empty table with room for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Create from vector of rows
    pub fn from_vec(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Add a row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get row at index
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Keep only the rows matching `keep`
    pub fn retain<F: FnMut(&Row) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }

    /// Rows as the charting library's data table body
    pub fn to_data_rows(&self) -> Vec<Value> {
        self.rows.iter().map(Row::to_data_row).collect()
    }
}

impl From<Vec<Row>> for ChartTable {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_vec(rows)
    }
}

impl IntoIterator for ChartTable {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChartTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(open: f64, close: f64) -> Row {
        Row::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            open.min(close) - 1.0,
            open,
            close,
            open.max(close) + 1.0,
        )
    }

    #[test]
    fn test_row_direction() {
        assert!(row(10.0, 12.0).is_rising());
        assert!(row(12.0, 10.0).is_falling());
        let flat = row(10.0, 10.0);
        assert!(!flat.is_rising() && !flat.is_falling());
        assert_eq!(row(10.0, 12.0).range(), 4.0);
        assert_eq!(row(12.0, 10.0).body_size(), 2.0);
    }

    #[test]
    fn test_data_row_column_order() {
        let data = row(10.0, 12.0).to_data_row();
        assert_eq!(
            data,
            json!(["2024-01-01T00:00:00.000Z", 9.0, 10.0, 12.0, 13.0])
        );
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let mut table = ChartTable::new();
        table.push(row(3.0, 4.0));
        table.push(row(1.0, 2.0));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).map(|r| r.open), Some(3.0));
        assert_eq!(table.to_data_rows().len(), 2);
    }
}
