// crates/product/src/infrastructure/bootstrap/product_operator.rs

use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::AppResult;
use shared_kernel::infrastructure::amqp::factories::AmqpContext;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::cache::ProductCache;
use crate::application::ProductOperator;
use crate::infrastructure::bootstrap::WorkerSettings;
use crate::infrastructure::postgres::repositories::PostgresProductRepository;

/// Assemble l'opérateur exposé à la couche HTTP. Le producer ouvre son
/// propre canal sur la file des demandes.
pub async fn build_product_operator(
    pool: PgPool,
    cache: Arc<dyn CacheRepository>,
    amqp: &AmqpContext,
    settings: &WorkerSettings,
) -> AppResult<ProductOperator> {
    let producer = amqp.producer(&settings.request_queue).await?;

    Ok(ProductOperator::new(
        Arc::new(PostgresProductRepository::new(pool)),
        ProductCache::new(cache, settings.cache_ttl),
        Arc::new(producer),
    ))
}
