//! Candlestick-chart: an embedded candlestick chart renderer for a host
//! dashboard platform.
//!
//! The host pushes a configuration message holding five parallel value
//! arrays (`open`, `close`, `low`, `high`, `timestamp`). This crate:
//!
//! - **Validation**: checks the configuration against the webapp descriptor
//!   and makes sure every required column is present
//! - **Row building**: coerces the arrays into a row-oriented [`ChartTable`]
//! - **Filters**: applies the host's dashboard facet filters to the table
//! - **Rendering**: hands the table to a charting library through the
//!   [`ChartRenderer`] seam (an HTML page backed by Google Charts ships here)
//!
//! # Example
//!
//! ```no_run
//! use candlestick_chart::prelude::*;
//!
//! # async fn demo(raw: &str) {
//! let (loader, library) = library_channel();
//! loader.loaded();
//!
//! let mut session = RenderSession::new(
//!     WebAppDescriptor::candlestick(),
//!     HtmlRenderer::new(),
//!     LogSurface,
//!     library,
//! );
//! let state = session.handle_raw(raw).await;
//! # let _ = state;
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod message;
pub mod render;
pub mod session;
pub mod validation;

pub use builder::{build_rows, RowBuilder};
pub use config::{LengthPolicy, RenderOptions, WebAppConfig, WebAppDescriptor};
pub use data::{ChartTable, Row};
pub use error::{ChartError, ValidationError};
pub use render::{ChartRenderer, FatalErrorSurface, HtmlRenderer};
pub use session::{RenderSession, RenderState};

// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::filters::*;
    pub use crate::message::*;
    pub use crate::render::*;
    pub use crate::session::*;
    pub use crate::validation::*;
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ChartError>;
