use anyhow::Context;
use marquee::{config::Config, observability, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    observability::init_tracing(&config);

    let state = AppState::new(config.clone());
    let app = routes::router(&config, state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.service.port))
        .await
        .with_context(|| format!("binding port {}", config.service.port))?;
    tracing::info!(service = %config.service.name, port = config.service.port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "failed to listen for shutdown signal"),
    }
}
