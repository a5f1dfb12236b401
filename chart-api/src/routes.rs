use crate::error::ApiError;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use candlestick_chart::message::{parse_message, InboundMessage, HANDSHAKE_TOKEN};
use candlestick_chart::render::{LibraryHandle, LogSurface};
use candlestick_chart::{
    ChartError, ChartRenderer, ChartTable, HtmlRenderer, LengthPolicy, RenderOptions,
    RenderSession, RenderState, WebAppConfig, WebAppDescriptor,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub descriptor: Arc<WebAppDescriptor>,
    pub policy: LengthPolicy,
    pub options: RenderOptions,
}

impl AppState {
    /// Session for a single request. The page itself loads the charting
    /// library, so it counts as available here.
    fn session<R: ChartRenderer>(
        &self,
        renderer: R,
        options: RenderOptions,
    ) -> RenderSession<Arc<WebAppDescriptor>, R, LogSurface> {
        RenderSession::new(
            self.descriptor.clone(),
            renderer,
            LogSurface,
            LibraryHandle::ready_now(),
        )
        .with_policy(self.policy)
        .with_options(options)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/handshake", get(handshake))
        .route(
            "/reformat_data",
            get(reformat_data_query).post(reformat_data),
        )
        .route("/chart", post(chart))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handshake() -> &'static str {
    HANDSHAKE_TOKEN
}

/// Keeps the data rows instead of drawing them
#[derive(Default)]
struct RowsRenderer {
    rows: Vec<Value>,
}

impl ChartRenderer for RowsRenderer {
    fn draw(&mut self, table: &ChartTable, _options: &RenderOptions) -> candlestick_chart::Result<()> {
        self.rows = table.to_data_rows();
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct Viewport {
    width: Option<u32>,
    height: Option<u32>,
}

fn inbound(body: &str) -> Result<InboundMessage, ApiError> {
    parse_message(body)
        .ok_or_else(|| ApiError::BadRequest("payload must be a JSON object".to_string()))
}

fn finish(state: RenderState) -> Result<(), ApiError> {
    match state {
        RenderState::Rendered { .. } => Ok(()),
        RenderState::Rejected(e) | RenderState::Failed(e) => Err(e.into()),
        other => Err(ChartError::Render(format!("session stopped in state {}", other.name())).into()),
    }
}

/// `?config=<json>&filters=<json>`, both JSON-encoded strings
#[derive(Debug, Default, Deserialize)]
struct ReformatQuery {
    config: Option<String>,
    filters: Option<String>,
}

impl ReformatQuery {
    fn into_message(self) -> Result<InboundMessage, ApiError> {
        let raw = self
            .config
            .ok_or_else(|| ApiError::Query("Missing config parameter".to_string()))?;
        let config: WebAppConfig = serde_json::from_str(&raw)
            .map_err(|e| ApiError::Query(format!("Invalid config: {}", e)))?;
        let filters = match self.filters {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| ApiError::Query(format!("Invalid filters: {}", e)))?,
            None => Value::Null,
        };
        Ok(InboundMessage::new(config, filters))
    }
}

async fn reformat_data(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    reformat(&state, inbound(&body)?).await
}

async fn reformat_data_query(
    State(state): State<AppState>,
    Query(query): Query<ReformatQuery>,
) -> Result<Json<Value>, ApiError> {
    reformat(&state, query.into_message()?).await
}

async fn reformat(state: &AppState, message: InboundMessage) -> Result<Json<Value>, ApiError> {
    let mut session = state.session(RowsRenderer::default(), state.options.clone());
    finish(session.handle(message).await)?;

    let rows = std::mem::take(&mut session.renderer_mut().rows);
    Ok(Json(json!({ "result": rows })))
}

async fn chart(
    State(state): State<AppState>,
    Query(viewport): Query<Viewport>,
    body: String,
) -> Result<Html<String>, ApiError> {
    let message = inbound(&body)?;
    let options = state.options.resized(
        viewport.width.unwrap_or(state.options.width),
        viewport.height.unwrap_or(state.options.height),
    );
    let mut session = state.session(HtmlRenderer::new(), options);
    finish(session.handle(message).await)?;

    session
        .renderer_mut()
        .take_page()
        .map(Html)
        .ok_or_else(|| ChartError::Render("no page rendered".to_string()).into())
}
