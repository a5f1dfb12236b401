//! Validation module
//!
//! Runs before any row is built: first the descriptor's parameter schema,
//! then the candlestick-specific shape check.

pub mod schema;
pub mod shape;

pub use schema::*;
pub use shape::*;
