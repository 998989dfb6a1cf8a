use anyhow::Result;
use axum::serve;
use quorate_core::{config::AppConfig, metrics::MetricsCollector, proxy::ProxyEngine};
use rustls::crypto::{ring::default_provider, CryptoProvider};
use server::app::create_app;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(config: &AppConfig) {
    let level = &config.logging.level;
    let default_filter = format!("warn,quorate_core={level},server={level}");
    let filter =
        EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_str() == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(false);
        registry.with(fmt_layer).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CryptoProvider::install_default(default_provider())
        .map_err(|e| anyhow::anyhow!("Failed to install crypto provider: {e:?}"))?;

    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;
    config.validate().map_err(|e| anyhow::anyhow!("Configuration validation failed: {e}"))?;

    init_logging(&config);
    info!("Starting quorate");
    debug!(
        backends = config.backends.urls.len(),
        blocks_behind_tolerance = config.backends.blocks_behind_tolerance,
        call_deadline_seconds = ?config.backends.call_deadline_seconds,
        "Configuration loaded"
    );

    let metrics_collector = Arc::new(MetricsCollector::new());
    let proxy_engine = Arc::new(
        ProxyEngine::from_config(&config.backends, metrics_collector)
            .map_err(|e| anyhow::anyhow!("Backend initialization failed: {e}"))?,
    );
    info!(backends = ?proxy_engine.backend_names().collect::<Vec<_>>(), "Backends configured");

    let app = create_app(proxy_engine, &config);
    let addr: SocketAddr = config.socket_addr().map_err(|e| anyhow::anyhow!(e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "RPC server listening");

    if let Err(e) =
        serve(listener, app.into_make_service()).with_graceful_shutdown(shutdown_signal()).await
    {
        error!(error = %e, "Server error occurred");
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                () = std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
