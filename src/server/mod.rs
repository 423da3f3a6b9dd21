pub mod handlers;
pub mod routes;
pub mod types;


use crate::config::AppConfig;
use crate::error::ArtifactError;
use crate::inference::InferenceService;
use crate::model::ModelStore;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::info;

/// Loads the model artifact and builds the router around it. Any artifact
/// problem is returned before a socket is ever bound.
pub fn build_app(
    config: &AppConfig,
    metrics: Option<PrometheusHandle>,
) -> Result<Router, ArtifactError> {
    let store = ModelStore::load(&config.model.path)?;
    let service = InferenceService::new(store);
    Ok(routes::create_router(service, metrics))
}

/// Loads the model, binds, and serves until the process is stopped.
pub async fn serve(config: AppConfig, metrics: Option<PrometheusHandle>) -> anyhow::Result<()> {
    let app = build_app(&config, metrics)?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
