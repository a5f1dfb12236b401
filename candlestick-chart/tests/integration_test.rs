//! Integration tests for candlestick-chart

use candlestick_chart::config::LengthPolicy;
use candlestick_chart::data::Row;
use candlestick_chart::message::{InboundMessage, HANDSHAKE_TOKEN};
use candlestick_chart::render::{library_channel, LibraryHandle};
use candlestick_chart::{
    ChartError, ChartRenderer, ChartTable, FatalErrorSurface, HtmlRenderer, RenderOptions,
    RenderSession, RenderState, RowBuilder, WebAppConfig, WebAppDescriptor,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::mpsc;

/// Helper function to create known rows
fn create_test_rows(count: usize, base_price: f64) -> Vec<Row> {
    let base_time = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * 0.1) + (i as f64 % 10.0) * 0.5;
            Row::new(
                base_time + Duration::minutes(i as i64),
                price - 1.0,
                price,
                price + 0.25,
                price + 1.0,
            )
        })
        .collect()
}

fn column(rows: &[Row], cell: impl Fn(&Row) -> String) -> Value {
    Value::Array(rows.iter().map(|r| Value::String(cell(r))).collect())
}

/// Lay rows out as the host does: one array per column, numbers as strings
fn to_config(rows: &[Row]) -> WebAppConfig {
    WebAppConfig::new()
        .with("timestamp", column(rows, |r| r.timestamp.to_rfc3339()))
        .with("low", column(rows, |r| r.low.to_string()))
        .with("open", column(rows, |r| r.open.to_string()))
        .with("close", column(rows, |r| r.close.to_string()))
        .with("high", column(rows, |r| r.high.to_string()))
}

#[derive(Default)]
struct Recorder {
    tables: Vec<ChartTable>,
}

impl ChartRenderer for Recorder {
    fn draw(&mut self, table: &ChartTable, _options: &RenderOptions) -> candlestick_chart::Result<()> {
        self.tables.push(table.clone());
        Ok(())
    }
}

#[derive(Default)]
struct Errors(Vec<String>);

impl FatalErrorSurface for Errors {
    fn display_fatal_error(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}

#[test]
fn test_round_trip_known_rows() {
    let rows = create_test_rows(50, 100.0);
    let table = RowBuilder::default().build(&to_config(&rows)).unwrap();

    assert_eq!(table.len(), rows.len());
    for (built, known) in table.iter().zip(&rows) {
        assert_eq!(built.timestamp, known.timestamp);
        assert!((built.low - known.low).abs() < 1e-9);
        assert!((built.open - known.open).abs() < 1e-9);
        assert!((built.close - known.close).abs() < 1e-9);
        assert!((built.high - known.high).abs() < 1e-9);
    }
}

#[test]
fn test_input_order_is_kept() {
    let mut rows = create_test_rows(5, 10.0);
    rows.reverse();
    let table = RowBuilder::default().build(&to_config(&rows)).unwrap();

    let times: Vec<DateTime<Utc>> = table.iter().map(|r| r.timestamp).collect();
    let expected: Vec<DateTime<Utc>> = rows.iter().map(|r| r.timestamp).collect();
    assert_eq!(times, expected);
}

#[test]
fn test_mismatched_lengths_per_policy() {
    let config = to_config(&create_test_rows(2, 10.0)).with("open", json!(["1", "2", "3"]));

    assert!(matches!(
        RowBuilder::new(LengthPolicy::Strict).build(&config),
        Err(ChartError::LengthMismatch { expected: 2, actual: 3, .. })
    ));
    assert_eq!(RowBuilder::new(LengthPolicy::Truncate).build(&config).unwrap().len(), 2);
    assert_eq!(
        RowBuilder::new(LengthPolicy::TimestampDriven)
            .build(&config)
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_missing_library_never_draws() {
    let (loader, library) = library_channel();
    drop(loader);

    let mut session = RenderSession::new(
        WebAppDescriptor::candlestick(),
        Recorder::default(),
        Errors::default(),
        library,
    );
    let msg = InboundMessage::new(to_config(&create_test_rows(3, 10.0)), Value::Null);
    let state = session.handle(msg).await;

    assert_eq!(state, RenderState::Rejected(ChartError::DependencyUnavailable));
    assert!(session.renderer().tables.is_empty());
    let shown = &session.surface().0;
    assert_eq!(shown.len(), 1);
    assert!(shown[0].contains("charting library") && shown[0].contains("connection"));
}

#[tokio::test]
async fn test_filters_reach_the_chart() {
    let rows = create_test_rows(10, 100.0);
    let threshold = rows[5].open;
    let payload = json!({
        "webAppConfig": to_config(&rows),
        "filters": [{"filterType": "NUMERICAL_FACET", "column": "open", "minValue": threshold}],
    });

    let mut session = RenderSession::new(
        WebAppDescriptor::candlestick(),
        Recorder::default(),
        Errors::default(),
        LibraryHandle::ready_now(),
    );
    let state = session.handle_raw(&payload.to_string()).await.unwrap();

    let expected = rows.iter().filter(|r| r.open >= threshold).count();
    assert_eq!(state, RenderState::Rendered { rows: expected });
    assert_eq!(session.renderer().tables[0].len(), expected);
}

#[tokio::test]
async fn test_run_handshake_then_messages() {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let (in_tx, in_rx) = mpsc::channel::<String>(8);

    let mut session = RenderSession::new(
        WebAppDescriptor::candlestick(),
        HtmlRenderer::new(),
        Errors::default(),
        LibraryHandle::ready_now(),
    )
    .with_options(RenderOptions::for_viewport(1024, 600));

    let payload = json!({ "webAppConfig": to_config(&create_test_rows(4, 50.0)) });
    in_tx.send("garbage".to_string()).await.unwrap();
    in_tx.send(payload.to_string()).await.unwrap();
    drop(in_tx);

    session.run(&out_tx, in_rx).await;

    assert_eq!(out_rx.try_recv().unwrap(), HANDSHAKE_TOKEN);
    assert_eq!(session.state(), &RenderState::Rendered { rows: 4 });
    let page = session.renderer().page().unwrap();
    assert!(page.contains("width: 1024px"));
    assert!(session.surface().0.is_empty());
}
