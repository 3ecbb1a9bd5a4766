use anyhow::Context;
use glosa_advisor::{
    config::{AdvisoryConfig, ServiceConfig},
    junctions::{JunctionRegistry, StaticJunctionRegistry},
    predictor::HttpPredictor,
    routes::{router, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ServiceConfig::from_env().context("failed to read service config")?;

    let advisory_cfg = match &cfg.advisory_config {
        Some(path) => AdvisoryConfig::load(path)
            .with_context(|| format!("failed to load advisory config {}", path.display()))?,
        None => AdvisoryConfig::default(),
    };
    tracing::info!("advisory config: {:?}", advisory_cfg);

    let junctions = StaticJunctionRegistry::load(&cfg.junctions_path)
        .with_context(|| format!("failed to load junctions from {}", cfg.junctions_path.display()))?;
    tracing::info!("loaded {} junctions from {}", junctions.all().len(), cfg.junctions_path.display());

    let predictor = HttpPredictor::new(&cfg.ai_service_url, cfg.predictor_timeout)
        .context("failed to build predictor client")?;
    tracing::info!("predictor endpoint {} (timeout {:?})", predictor.endpoint(), cfg.predictor_timeout);

    let app = router(AppState::new(predictor, junctions, advisory_cfg));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
