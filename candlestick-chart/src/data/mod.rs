//! Data module
//!
//! Chart rows, the table handed to the renderer, and raw value coercion.

pub mod coerce;
pub mod row;

pub use coerce::*;
pub use row::*;
