use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use candlestick_chart::ChartError;

/// Error returned by the chart endpoints.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Query parameters that are not valid JSON
    Query(String),
    Chart(ChartError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::Query(msg) => write!(f, "{msg}"),
            Self::Chart(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    // The host shows the body verbatim as the fatal error.
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Query(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Chart(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        (status, message).into_response()
    }
}

impl From<ChartError> for ApiError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}
