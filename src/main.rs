use pricecast::{config, observability, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load Config
    let config = config::AppConfig::load()?;

    // 2. Init logging & metrics
    observability::init_tracing(config.observability.json_logs)?;
    let metrics = if config.observability.metrics {
        Some(observability::install_metrics()?)
    } else {
        None
    };

    // 3. Load the model artifact, bind & serve
    server::serve(config, metrics).await
}
