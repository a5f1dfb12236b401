//! Standalone HTML page drawing the chart with Google Charts

use crate::config::RenderOptions;
use crate::data::ChartTable;
use crate::error::ChartError;
use crate::render::ChartRenderer;
use crate::Result;
use askama::Template;
use serde::Serialize;
use tracing::debug;

/// Loader script of the charting library
pub const GOOGLE_CHARTS_LOADER: &str = "https://www.gstatic.com/charts/loader.js";

#[derive(Template)]
#[template(path = "candlestick.html")]
struct CandlestickPage<'a> {
    title: &'a str,
    library_url: &'a str,
    width: u32,
    height: u32,
    data_json: String,
    options_json: String,
    load_error_json: String,
}

/// Renders the chart as an HTML page that delegates drawing to the
/// charting library in the browser.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    library_url: String,
    page: Option<String>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::with_library_url(GOOGLE_CHARTS_LOADER)
    }

    /// Use another loader script URL (self-hosted mirror)
    pub fn with_library_url(url: impl Into<String>) -> Self {
        Self {
            library_url: url.into(),
            page: None,
        }
    }

    /// Last rendered page
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Take the last rendered page, leaving none
    pub fn take_page(&mut self) -> Option<String> {
        self.page.take()
    }

    /// Render a page for the table without storing it
    pub fn render_page(&self, table: &ChartTable, options: &RenderOptions) -> Result<String> {
        let page = CandlestickPage {
            title: options.title.as_deref().unwrap_or("Candlestick chart"),
            library_url: &self.library_url,
            width: options.width,
            height: options.height,
            data_json: script_json(&table.to_data_rows())?,
            options_json: script_json(&options.to_chart_options())?,
            load_error_json: script_json(&ChartError::DependencyUnavailable.to_string())?,
        };
        page.render().map_err(|e| ChartError::Render(e.to_string()))
    }
}

impl ChartRenderer for HtmlRenderer {
    fn draw(&mut self, table: &ChartTable, options: &RenderOptions) -> Result<()> {
        let page = self.render_page(table, options)?;
        debug!(rows = table.len(), bytes = page.len(), "rendered chart page");
        self.page = Some(page);
        Ok(())
    }
}

/// JSON safe to inline in a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|e| ChartError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;
    use chrono::{TimeZone, Utc};

    fn table() -> ChartTable {
        ChartTable::from_vec(vec![Row::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            9.0,
            10.0,
            12.0,
            13.0,
        )])
    }

    #[test]
    fn test_page_contains_rows_and_options() {
        let mut renderer = HtmlRenderer::new();
        renderer
            .draw(&table(), &RenderOptions::for_viewport(800, 400))
            .unwrap();

        let page = renderer.page().unwrap();
        assert!(page.contains(GOOGLE_CHARTS_LOADER));
        assert!(page.contains("[[\"2024-01-01T00:00:00.000Z\",9.0,10.0,12.0,13.0]]"));
        assert!(page.contains("\"risingColor\""));
        assert!(page.contains("CandlestickChart"));
        assert!(page.contains("width: 800px"));
    }

    #[test]
    fn test_title_cannot_close_script() {
        let options = RenderOptions {
            title: Some("</script><b>".to_string()),
            ..RenderOptions::default()
        };
        let page = HtmlRenderer::new().render_page(&table(), &options).unwrap();
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("<title>&lt;"));
    }

    #[test]
    fn test_take_page() {
        let mut renderer = HtmlRenderer::new();
        renderer.draw(&ChartTable::new(), &RenderOptions::default()).unwrap();
        let page = renderer.take_page().unwrap();
        assert!(page.contains("var rows = [];"));
        // an empty table still gets typed columns
        assert!(page.contains("data.addColumn('date', 'timestamp');"));
        assert_eq!(page.matches("data.addColumn('number'").count(), 4);
        assert!(!page.contains("arrayToDataTable"));
        assert!(renderer.page().is_none());
    }
}
