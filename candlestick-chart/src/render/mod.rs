//! Rendering module
//!
//! The charting library itself is an external collaborator. This module
//! holds the seams the session talks to: the library's load signal, the
//! drawing call, and the fatal error display.

pub mod html;
pub mod library;

pub use html::*;
pub use library::*;

use crate::config::RenderOptions;
use crate::data::ChartTable;
use crate::Result;
use tracing::error;

/// Draws a chart table with the external charting library
pub trait ChartRenderer {
    /// Draw the table. Called at most once per message.
    fn draw(&mut self, table: &ChartTable, options: &RenderOptions) -> Result<()>;
}

/// Shows an unrecoverable error to the end user
pub trait FatalErrorSurface {
    fn display_fatal_error(&mut self, message: &str);
}

/// Fatal error surface that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

impl FatalErrorSurface for LogSurface {
    fn display_fatal_error(&mut self, message: &str) {
        error!(%message, "fatal chart error");
    }
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for &mut R {
    fn draw(&mut self, table: &ChartTable, options: &RenderOptions) -> Result<()> {
        (**self).draw(table, options)
    }
}

impl<E: FatalErrorSurface + ?Sized> FatalErrorSurface for &mut E {
    fn display_fatal_error(&mut self, message: &str) {
        (**self).display_fatal_error(message)
    }
}
