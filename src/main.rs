use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dashboard_server::config::AppConfig;
use dashboard_server::services::catalog::builtin_pages;
use dashboard_server::services::gateway::PgQueryGateway;
use dashboard_server::services::registry::PageRegistry;
use dashboard_server::{routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_server=debug,tower_http=debug,sqlx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    config.validate().context("Invalid DEFAULT_PAGE")?;

    let mut builder = PageRegistry::builder();
    builder.register_all(builtin_pages())?;
    if let Some(manifest) = &config.pages_manifest {
        builder.register_manifest(manifest)?;
    }
    let registry = builder.build();

    if !registry.contains(&config.default_page) {
        tracing::warn!(page_id = %config.default_page, "Default page is not registered");
    }
    tracing::info!(pages = ?registry.ids(), "Page registry loaded");

    let gateway = PgQueryGateway::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid BACKEND_HOST/BACKEND_PORT")?;

    let state = AppState {
        registry: Arc::new(registry),
        gateway: Arc::new(gateway),
        config,
    };
    let app = routes::router(state);

    tracing::info!(host = %addr, "Starting dashboard server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
