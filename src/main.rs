use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use outfit_recommender::{
    api::{create_router, AppState},
    config::{CacheBackend, Config, LogFormat},
    db::{self, CacheStore, CacheWriterHandle, MemoryStore, RedisStore},
    services::{Catalog, PgCatalog, RecommendationCache, RecommendationService},
};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("outfit_recommender=info,tower_http=info"));

    match format {
        LogFormat::Compact => tracing_subscriber::fmt().with_env_filter(filter).compact().init(),
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
    }
}

/// Builds the configured cache store; the handle is present only for Redis
fn build_cache_store(config: &Config) -> anyhow::Result<(Arc<dyn CacheStore>, Option<CacheWriterHandle>)> {
    match config.cache_backend {
        CacheBackend::Redis => {
            let client = db::create_redis_client(&config.redis_url)?;
            let (store, handle) = RedisStore::new(client);
            Ok((Arc::new(store), Some(handle)))
        }
        CacheBackend::Memory => Ok((Arc::new(MemoryStore::new()), None)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let pool = db::create_pool(&config.database_url).await?;
    let catalog: Arc<dyn Catalog> = Arc::new(PgCatalog::new(pool));

    let (store, writer) = build_cache_store(&config)?;
    tracing::info!(
        catalog = catalog.name(),
        cache = store.name(),
        ttl_secs = config.cache_ttl_secs,
        "Recommendation backends ready"
    );

    let cache = RecommendationCache::new(store, config.cache_ttl_secs);
    let state = AppState::new(RecommendationService::new(catalog, cache));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(writer) = writer {
        writer.shutdown().await;
    }

    Ok(())
}
