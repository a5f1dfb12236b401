use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;

use config::Config;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    info!("Starting candlestick chart server...");

    let descriptor = config.load_descriptor()?;
    info!(
        params = descriptor.params.len(),
        policy = %config.length_policy,
        "Webapp descriptor loaded"
    );

    let state = AppState {
        descriptor: Arc::new(descriptor),
        policy: config.length_policy,
        options: config.render_options(),
    };
    let app = routes::router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chart server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
