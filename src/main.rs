use anyhow::Context;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rentals::config::Config;
use rentals::database::PgRentalsRepo;
use rentals::services::RentalsService;
use rentals::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rentals=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("failed to read config")?;
    info!(env = %config.env, db = ?config.db.source, "starting rentals service");

    let pool = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .connect_with(config.db.connect_options()?)
        .await
        .context("failed to connect to database")?;
    info!(
        "connected to database {}",
        config.db.database_name().unwrap_or("from DATABASE_URL")
    );

    let state = AppState {
        rentals: RentalsService::new(Arc::new(PgRentalsRepo::new(pool.clone())))
            .with_timeout(config.request_timeout),
    };
    let app = web::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.server_port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.server_port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}
