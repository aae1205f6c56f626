// crates/product/src/infrastructure/bootstrap/refresh_scheduler.rs

use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use shared_kernel::infrastructure::amqp::factories::AmqpContext;
use shared_kernel::infrastructure::bootstrap::wait_for_shutdown_signal;
use shared_kernel::infrastructure::postgres::factories::PostgresContext;
use shared_kernel::infrastructure::telemetry::init_tracing;
use std::sync::Arc;

use crate::application::workers::RefreshScheduler;
use crate::infrastructure::bootstrap::WorkerSettings;
use crate::infrastructure::postgres::repositories::PostgresProductRepository;
use crate::infrastructure::postgres::utils::run_postgres_migrations;

pub async fn run_refresh_scheduler() -> AppResult<()> {
    init_tracing();
    tracing::info!("Starting product refresh scheduler");

    let settings = WorkerSettings::from_env()?;

    let postgres = PostgresContext::builder()?
        .with_application_name("product-refresh-scheduler")
        .build()
        .await?;
    run_postgres_migrations(&postgres.pool()).await.map_err(|e| {
        AppError::new(ErrorCode::InfrastructureFailure, format!("Migrations failed: {}", e))
    })?;

    let amqp = AmqpContext::builder()?
        .with_connection_name("product-refresh-scheduler")
        .build()
        .await?;
    let producer = Arc::new(amqp.producer(&settings.request_queue).await?);
    let repo = Arc::new(PostgresProductRepository::new(postgres.pool()));

    let scheduler = RefreshScheduler::new(repo, producer, settings.refresh.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping scheduler...");
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        queue = %settings.request_queue,
        batch_size = settings.refresh.batch_size,
        polling_ms = settings.refresh.polling_interval.as_millis() as u64,
        "Refresh scheduler configured"
    );

    scheduler.run(shutdown_rx).await;

    if let Err(e) = amqp.close().await {
        tracing::warn!(error = %e, "Failed to close AMQP connection");
    }
    postgres.close().await;

    tracing::info!("Refresh scheduler exited");
    Ok(())
}
