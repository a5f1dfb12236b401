//! Error types

use thiserror::Error;

/// Configuration does not have the shape the chart needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Field {field} must be a list of values, got {found}")]
    NotAnArray { field: String, found: &'static str },

    #[error("Missing mandatory parameter: {name}")]
    MissingParameter { name: String },

    #[error("Parameter {name} must be of type {expected}, got {found}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid webapp descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Everything that can stop a chart from being drawn.
///
/// Every variant is terminal for the message that caused it; the display
/// string is what the fatal error surface shows to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to load the charting library. Check your internet connection.")]
    DependencyUnavailable,

    #[error("Cannot convert {field}[{index}] ({value}) to a {target}")]
    Coercion {
        field: String,
        index: usize,
        value: String,
        target: &'static str,
    },

    #[error("Column {field} has {actual} values but timestamp has {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Error with filter on column {column} - {reason}")]
    Filter { column: String, reason: String },

    #[error("Invalid filters: {0}")]
    InvalidFilters(String),

    #[error("Dataset is empty after filtering")]
    EmptyAfterFilter,

    #[error("Render failed: {0}")]
    Render(String),
}

impl ChartError {
    /// True for errors raised while validating, before any row is built.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DependencyUnavailable)
    }

    pub(crate) fn filter(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Filter {
            column: column.into(),
            reason: reason.into(),
        }
    }
}
