// crates/shared-kernel/src/infrastructure/redis/utils/redis_test_context.rs

use crate::domain::repositories::CacheRepository;
use crate::infrastructure::redis::factories::RedisContext;
use crate::infrastructure::redis::repositories::RedisCacheRepository;
use crate::infrastructure::redis::utils::RedisTestContextBuilder;
use std::sync::Arc;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::{Redis as RedisImage, REDIS_PORT};

pub struct RedisTestContext {
    context: RedisContext,
    _container: ContainerAsync<RedisImage>,
}

impl RedisTestContext {
    pub fn builder() -> RedisTestContextBuilder {
        RedisTestContextBuilder::new()
    }

    pub fn repository(&self) -> Arc<RedisCacheRepository> {
        self.context.repository()
    }

    pub fn cache(&self) -> Arc<dyn CacheRepository> {
        self.context.cache()
    }

    pub fn url(&self) -> &str {
        self.context.url()
    }

    pub(crate) async fn restore(builder: RedisTestContextBuilder) -> Self {
        let container = RedisImage::default()
            .with_tag(&builder.image_tag)
            .start()
            .await
            .expect("Failed to start Redis container");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(REDIS_PORT).await.unwrap();
        let url = format!("redis://{}:{}", host, port);

        // builder_raw() : l'URL du container, sans lire l'environnement
        let context = RedisContext::builder_raw()
            .with_url(&url)
            .with_config(builder.config)
            .build()
            .await
            .expect("Failed to build RedisContext for tests");

        Self {
            context,
            _container: container,
        }
    }
}
