use anyhow::Context;

use inquiry_infra::config::InquiryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inquiry_observability::init();

    let config = InquiryConfig::from_env().context("invalid configuration")?;
    tracing::info!(backend = ?config.backend, "initializing record store");

    let app = inquiry_api::app::build_app(&config)
        .await
        .context("failed to initialize record store")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    // The router (and with it the shared store handle) is dropped here.
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
