// crates/shared-kernel/src/infrastructure/redis/repositories/redis_cache_repository.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use fred::types::{Builder, Expiration};
use std::time::Duration;

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::redis::factories::RedisConfig;

pub struct RedisCacheRepository {
    pool: Pool,
}

impl RedisCacheRepository {
    pub async fn connect(redis_url: &str, settings: &RedisConfig) -> AppResult<Self> {
        let config = Config::from_url(redis_url)
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

        let pool = Builder::from_config(config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = settings.command_timeout;
                cfg.internal_command_timeout = settings.command_timeout;
                cfg.max_command_attempts = settings.max_command_attempts;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(settings.max_clients.max(1))
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

        // init() attend que chaque client du pool soit connecté
        pool.init().await.map_err(|e| {
            AppError::new(
                ErrorCode::InfrastructureFailure,
                format!("Failed to connect to Redis at {}: {}", redis_url, e),
            )
        })?;

        Ok(Self { pool })
    }

    fn infra(e: fred::error::Error) -> AppError {
        AppError::new(ErrorCode::InfrastructureFailure, e.to_string())
    }

    fn map_expiration(ttl: Option<Duration>) -> Option<Expiration> {
        ttl.map(|d| {
            if d < Duration::from_secs(1) {
                Expiration::PX(d.as_millis().max(1) as i64)
            } else {
                Expiration::EX(d.as_secs() as i64)
            }
        })
    }
}

#[async_trait]
impl CacheRepository for RedisCacheRepository {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.pool
            .set::<(), _, _>(key, value, Self::map_expiration(ttl), None, false)
            .await
            .map_err(Self::infra)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        // Clé absente = nil côté Redis = None ici, jamais une erreur
        self.pool
            .get::<Option<String>, _>(key)
            .await
            .map_err(Self::infra)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.pool.del::<i64, _>(key).await.map_err(Self::infra)?;
        Ok(())
    }
}
