use std::sync::Arc;

use anyhow::Context;
use rosterdesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rosterdesk_observability::init();

    let config = AppConfig::from_env()?;
    let services = rosterdesk_api::app::services::AppServices::from_config(&config)
        .context("failed to build services")?;
    let app = rosterdesk_api::app::build_app(Arc::new(services));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        seed_demo_data = config.seed_demo_data,
        delete_policy = ?config.delete_policy,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")
}
