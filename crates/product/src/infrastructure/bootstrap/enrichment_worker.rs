// crates/product/src/infrastructure/bootstrap/enrichment_worker.rs

use shared_kernel::application::workers::WorkerPool;
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use shared_kernel::infrastructure::amqp::factories::AmqpContext;
use shared_kernel::infrastructure::bootstrap::spawn_shutdown_listener;
use shared_kernel::infrastructure::postgres::factories::PostgresContext;
use shared_kernel::infrastructure::redis::factories::RedisContext;
use shared_kernel::infrastructure::telemetry::init_tracing;
use std::sync::Arc;

use crate::application::apply_enrichment_result::ApplyEnrichmentResultUseCase;
use crate::application::cache::ProductCache;
use crate::application::workers::EnrichmentWorker;
use crate::infrastructure::bootstrap::WorkerSettings;
use crate::infrastructure::postgres::repositories::PostgresProductRepository;
use crate::infrastructure::postgres::utils::run_postgres_migrations;

const CONSUMER_TAG: &str = "product-enrichment-worker";

pub async fn run_enrichment_worker() -> AppResult<()> {
    // 1. Logs
    init_tracing();
    tracing::info!("Starting product enrichment worker");

    // 2. Configuration
    let settings = WorkerSettings::from_env()?;

    // 3. Infrastructure
    let postgres = PostgresContext::builder()?
        .with_application_name(CONSUMER_TAG)
        .build()
        .await?;
    run_postgres_migrations(&postgres.pool()).await.map_err(|e| {
        AppError::new(ErrorCode::InfrastructureFailure, format!("Migrations failed: {}", e))
    })?;

    let redis = RedisContext::builder()?.build().await?;
    let amqp = AmqpContext::builder()?
        .with_connection_name(CONSUMER_TAG)
        .build()
        .await?;

    // 4. Consumer : prefetch = taille du pool
    let pool = WorkerPool::new(settings.worker_pool_size)
        .with_max_redeliveries(settings.max_redeliveries);
    let consumer = Arc::new(amqp.consumer(&settings.result_queue, CONSUMER_TAG, pool).await?);

    let repo = Arc::new(PostgresProductRepository::new(postgres.pool()));
    let use_case = ApplyEnrichmentResultUseCase::new(repo)
        .with_cache(ProductCache::new(redis.cache(), settings.cache_ttl));

    // 5. Arrêt propre : le signal annule le token, le pool draine
    let listener = spawn_shutdown_listener(consumer.shutdown_token());

    tracing::info!(
        queue = %settings.result_queue,
        workers = settings.worker_pool_size,
        max_redeliveries = ?settings.max_redeliveries,
        "Enrichment worker configured"
    );

    let worker = EnrichmentWorker::new(consumer, Arc::new(use_case));
    let outcome = worker.start().await;

    // 6. Libération des ressources
    listener.abort();
    if let Err(e) = amqp.close().await {
        tracing::warn!(error = %e, "Failed to close AMQP connection");
    }
    postgres.close().await;

    tracing::info!("Enrichment worker exited");
    outcome
}
