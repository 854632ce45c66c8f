mod config;
mod refresher;
mod routes;

use anyhow::Context;
use campaign_core::{CampaignSource, CampaignStore, FileCampaignStore, MockFileSource};
use config::Config;
use routes::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(
        "campaign api starting dir={} source={} refresh_ms={}",
        config.campaign_dir.display(),
        config.mock_source.display(),
        config.refresh_every.as_millis()
    );

    let store: Arc<dyn CampaignStore> = Arc::new(FileCampaignStore::new(&config.campaign_dir));
    let source: Arc<dyn CampaignSource> = Arc::new(MockFileSource::new(&config.mock_source));
    let refresher = refresher::spawn_refresher(source, store.clone(), config.refresh_every);

    let app = routes::router(AppState { store });
    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    info!("campaign api listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.abort();
    info!("campaign api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
