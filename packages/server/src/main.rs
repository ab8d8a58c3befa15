use std::sync::Arc;

use anyhow::Context;
use shelter_common::media::build_uploader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shelter_server::config::AppConfig;
use shelter_server::repository::{DogRepository, SqlDogRepository};
use shelter_server::state::AppState;
use shelter_server::{build_router, database, flash, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelter_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    if config.uses_dev_secret() {
        warn!("SECRET_KEY is not set; using the development default");
    }

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    seed::ensure_indexes(&db).await?;

    let dogs: Arc<dyn DogRepository> = Arc::new(SqlDogRepository::new(db));
    if config.database.seed_demo_data {
        seed::seed_demo_dogs(dogs.as_ref()).await?;
    }

    let media = build_uploader(&config.media, config.uploads.max_content_length)
        .await
        .context("Failed to initialize media provider")?;
    info!(provider = media.provider(), "Media provider ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        cookie_key: flash::cookie_key(&config.session.secret_key),
        config: Arc::new(config),
        dogs,
        media,
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
