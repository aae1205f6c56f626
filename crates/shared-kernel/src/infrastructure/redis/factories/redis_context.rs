// crates/shared-kernel/src/infrastructure/redis/factories/redis_context.rs

use std::sync::Arc;

use crate::domain::repositories::CacheRepository;
use crate::errors::AppResult;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};
use crate::infrastructure::redis::repositories::RedisCacheRepository;

/// Pool Redis prêt à l'emploi, exposé au reste de l'application comme
/// simple `CacheRepository`.
pub struct RedisContext {
    repository: Arc<RedisCacheRepository>,
    url: String,
    config: RedisConfig,
}

impl RedisContext {
    pub fn builder() -> AppResult<RedisContextBuilder> {
        RedisContextBuilder::new()
    }

    /// Sans lecture de l'environnement (tests, outils).
    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    pub fn repository(&self) -> Arc<RedisCacheRepository> {
        Arc::clone(&self.repository)
    }

    pub fn cache(&self) -> Arc<dyn CacheRepository> {
        self.repository.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    pub(crate) async fn restore(builder: RedisContextBuilder) -> AppResult<Self> {
        let RedisContextBuilder { url, config } = builder;
        let repository = RedisCacheRepository::connect(&url, &config).await?;

        tracing::info!(
            max_clients = config.max_clients,
            timeout_ms = config.command_timeout.as_millis() as u64,
            "Redis cache pool ready"
        );

        Ok(Self {
            repository: Arc::new(repository),
            url,
            config,
        })
    }
}
