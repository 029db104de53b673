use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cleaning_quotes::cache::AppCache;
use cleaning_quotes::config::Settings;
use cleaning_quotes::pricing::ConfigStore;
use cleaning_quotes::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cleaning_quotes=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = ConfigStore::new(settings.pricing_config_path.clone());
    let cache = AppCache::new(store, settings.pricing_config_ttl);

    // Load once up front so a broken config file shows in the startup log
    match cache.pricing_config().await {
        Ok(config) => info!(
            "Pricing config loaded from {} (markup {}%)",
            settings.pricing_config_path.display(),
            config.markup_percentage
        ),
        Err(e) => warn!("Pricing config unavailable at startup: {}", e),
    }

    let router = app(AppState { cache });

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!("Listening on {}", settings.bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
