use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use verso::{
    app_state::AppState,
    config::Config,
    history::HistoryStore,
    pipeline::Pipeline,
    routes::router,
    sanitizer::SanitizationPolicy,
    translator::{GeminiClient, Translator},
};

const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    if std::env::var(ENV_LOG_FORMAT).is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    if config.credential().is_none() {
        warn!("GEMINI_API_KEY is not set; translation requests will be rejected");
    }

    let client = GeminiClient::new(config.endpoint().clone());
    let translator = Translator::new(Arc::new(client), config.credential().cloned());
    let pipeline = Pipeline::new(translator, Arc::new(SanitizationPolicy::standard()));
    let state = AppState::new(
        pipeline,
        HistoryStore::new(config.history_limit()),
        config.defaults().clone(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!(addr = config.bind_addr(), "API server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
