// crates/shared-kernel/src/domain/repositories/cache_repository.rs

use crate::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

/// Port de cache clé/valeur.
/// `Ok(None)` signifie "pas en cache", jamais "n'existe pas".
#[async_trait]
pub trait CacheRepository: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn delete(&self, key: &str) -> AppResult<()>;
}
