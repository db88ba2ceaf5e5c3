use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use ext_api::app::{build_auth_service, create_app};
use ext_api::middleware::create_cors;
use ext_api::routes::extension::AppState;
use ext_core::repositories::{SessionRepository, TokenVersionRepository};
use ext_core::services::{CachedTokenVersionRepository, RateLimiter};
use ext_infra::cache::{RedisClient, RedisSessionRepository, RedisTokenVersionCache};
use ext_infra::database::{DatabasePool, MySqlTokenVersionRepository};
use ext_infra::memory::{
    InMemoryRateLimiter, InMemorySessionRepository, InMemoryTokenVersionRepository,
};
use ext_infra::services::RedisRateLimiter;
use ext_shared::config::{AppConfig, StorageBackend};

/// Collaborators chosen by `STORAGE_BACKEND`
struct Backends {
    versions: Arc<dyn TokenVersionRepository>,
    rate_limiter: Arc<dyn RateLimiter>,
    sessions: Arc<dyn SessionRepository>,
    database: Option<DatabasePool>,
}

async fn connect_backends(config: &AppConfig) -> anyhow::Result<Backends> {
    match config.storage {
        StorageBackend::Mysql => {
            let database = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to MySQL")?;
            if !database.health_check().await? {
                warn!("MySQL answered the health check unexpectedly");
            }
            info!("{}", database.get_statistics());
            let redis = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            if !redis.health_check().await? {
                warn!("Redis answered the health check unexpectedly");
            }

            let repository: Arc<dyn TokenVersionRepository> =
                Arc::new(MySqlTokenVersionRepository::new(database.get_pool().clone()));
            let versions: Arc<dyn TokenVersionRepository> = if config.cache.version_cache_enabled() {
                info!(
                    "Caching token versions for {}s",
                    config.cache.token_version_ttl
                );
                Arc::new(CachedTokenVersionRepository::new(
                    repository,
                    Arc::new(RedisTokenVersionCache::new(redis.clone())),
                ))
            } else {
                repository
            };

            Ok(Backends {
                versions,
                rate_limiter: Arc::new(RedisRateLimiter::new(redis.clone())),
                sessions: Arc::new(RedisSessionRepository::new(redis, &config.auth.session)),
                database: Some(database),
            })
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; tokens and sessions do not survive a restart");
            Ok(Backends {
                versions: Arc::new(InMemoryTokenVersionRepository::new()),
                rate_limiter: Arc::new(InMemoryRateLimiter::new()),
                sessions: Arc::new(InMemorySessionRepository::new()),
                database: None,
            })
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    config.validate().map_err(anyhow::Error::msg)?;

    info!(
        "Starting extension token API ({} environment, {:?} storage)",
        config.environment, config.storage
    );

    let backends = connect_backends(&config).await?;

    let auth_service = build_auth_service(
        &config.auth.jwt,
        &config.rate_limit,
        backends.versions,
        backends.rate_limiter,
    );
    let app_state = web::Data::new(AppState::new(
        Arc::new(auth_service),
        backends.sessions,
        config.auth.session.cookie_name.clone(),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), create_cors(&cors_config, environment))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(database) = backends.database {
        database.close().await;
    }
    info!("Server stopped");
    Ok(())
}
