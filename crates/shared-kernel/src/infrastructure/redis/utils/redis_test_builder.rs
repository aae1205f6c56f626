// crates/shared-kernel/src/infrastructure/redis/utils/redis_test_builder.rs

use std::time::Duration;

use crate::infrastructure::redis::factories::RedisConfig;
use crate::infrastructure::redis::utils::RedisTestContext;

/// Container Redis éphémère. Pool réduit et timeout court par défaut :
/// un test de cache qui bloque doit échouer vite.
pub struct RedisTestContextBuilder {
    pub(crate) image_tag: String,
    pub(crate) config: RedisConfig,
}

impl Default for RedisTestContextBuilder {
    fn default() -> Self {
        Self {
            image_tag: "7.2-alpine".to_string(),
            config: RedisConfig {
                max_clients: 2,
                command_timeout: Duration::from_secs(2),
                max_command_attempts: 1,
            },
        }
    }
}

impl RedisTestContextBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn with_image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    pub fn with_max_clients(mut self, max_clients: usize) -> Self {
        self.config.max_clients = max_clients;
        self
    }

    pub fn with_config(mut self, config: RedisConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> RedisTestContext {
        RedisTestContext::restore(self).await
    }
}
