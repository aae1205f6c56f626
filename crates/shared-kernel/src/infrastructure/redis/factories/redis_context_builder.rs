// crates/shared-kernel/src/infrastructure/redis/factories/redis_context_builder.rs

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::redis::factories::{RedisConfig, RedisContext};

pub struct RedisContextBuilder {
    pub(crate) url: String,
    pub(crate) config: RedisConfig,
}

impl Default for RedisContextBuilder {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            config: RedisConfig::default(),
        }
    }
}

impl RedisContextBuilder {
    /// `PRODUCT_REDIS_URL` est obligatoire, le reste a des valeurs par défaut.
    pub fn new() -> AppResult<Self> {
        let url = std::env::var("PRODUCT_REDIS_URL")
            .map_err(|_| AppError::new(ErrorCode::InternalError, "PRODUCT_REDIS_URL must be set"))?;

        Ok(Self {
            url,
            config: RedisConfig::default().overridden_by_env(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_config(mut self, config: RedisConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> AppResult<RedisContext> {
        RedisContext::restore(self).await
    }
}
