//! Handling of columns whose lengths disagree

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the row builder does when the five columns differ in length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Any column whose length differs from `timestamp` is an error.
    #[default]
    Strict,
    /// Build as many rows as the shortest column allows.
    Truncate,
    /// Build one row per timestamp. Extra values are ignored; a missing
    /// value fails coercion at its index.
    #[serde(rename = "timestamp")]
    TimestampDriven,
}

impl LengthPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Truncate => "truncate",
            Self::TimestampDriven => "timestamp",
        }
    }
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "truncate" => Ok(Self::Truncate),
            "timestamp" | "timestamp_driven" => Ok(Self::TimestampDriven),
            other => Err(format!(
                "unknown length policy '{}' (expected strict, truncate or timestamp)",
                other
            )),
        }
    }
}
