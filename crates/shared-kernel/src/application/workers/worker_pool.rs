// crates/shared-kernel/src/application/workers/worker_pool.rs

use crate::application::ports::{Delivery, DeliveryStream, MessageHandler};
use crate::errors::{AppError, AppResult, ErrorCode};
use futures_util::{FutureExt, StreamExt};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Pool borné de handlers : au plus `size` messages traités en même temps.
///
/// Chaque message est acquitté une seule fois :
/// - succès : `ack`
/// - erreur ou panic : `nack(requeue = true)`, sauf si le plafond de
///   re-livraisons est atteint (`nack(requeue = false)`, le broker route
///   alors vers sa dead-letter si elle existe)
#[derive(Debug)]
pub struct WorkerPool {
    concurrency_limit: Arc<Semaphore>,
    size: usize,
    max_redeliveries: Option<u32>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = if size == 0 {
            tracing::warn!("Worker pool size 0 is invalid, falling back to 1");
            1
        } else {
            size
        };

        Self {
            concurrency_limit: Arc::new(Semaphore::new(size)),
            size,
            max_redeliveries: None,
        }
    }

    pub fn with_max_redeliveries(mut self, max: Option<u32>) -> Self {
        self.max_redeliveries = max;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_redeliveries(&self) -> Option<u32> {
        self.max_redeliveries
    }

    /// Tire les messages du stream tant que `shutdown` n'est pas annulé.
    /// Au retour, tous les handlers lancés sont terminés et acquittés.
    pub async fn run(
        &self,
        mut deliveries: DeliveryStream,
        handler: MessageHandler,
        shutdown: CancellationToken,
    ) -> AppResult<()> {
        let tracker = TaskTracker::new();

        let outcome = loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break Ok(()),
                next = deliveries.next() => next,
            };

            let delivery = match next {
                Some(Ok(delivery)) => delivery,
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Delivery stream failed");
                    break Err(e);
                }
                None => {
                    tracing::warn!("Delivery stream closed by broker");
                    break Ok(());
                }
            };

            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    // Pas encore démarré : on le rend au broker
                    if let Err(e) = delivery.nack(true).await {
                        tracing::error!(error = %e, "Failed to requeue pending delivery");
                    }
                    break Ok(());
                }
                permit = Arc::clone(&self.concurrency_limit).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(e) => break Err(AppError::new(ErrorCode::InternalError, e.to_string())),
                },
            };

            let handler = Arc::clone(&handler);
            let max_redeliveries = self.max_redeliveries;

            tracker.spawn(async move {
                process(delivery, handler, max_redeliveries).await;
                drop(permit);
            });
        };

        tracing::info!(in_flight = tracker.len(), "Draining worker pool");
        tracker.close();
        tracker.wait().await;
        tracing::info!("Worker pool drained");

        outcome
    }
}

async fn process(delivery: Box<dyn Delivery>, handler: MessageHandler, max_redeliveries: Option<u32>) {
    let payload = delivery.payload().to_vec();

    // L'appel lui-même est dans le future : un panic synchrone est aussi capturé
    let result = AssertUnwindSafe(async move { handler(payload).await })
        .catch_unwind()
        .await;

    let failure = match result {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some("handler panicked".to_string()),
    };

    let settled = match failure {
        None => delivery.ack().await,
        Some(reason) => {
            let attempts = delivery.redelivery_count();
            let requeue = max_redeliveries.map_or(true, |max| attempts < max);

            if requeue {
                tracing::warn!(%reason, attempts, "Handler failed, message requeued");
            } else {
                tracing::error!(%reason, attempts, "Handler failed, redelivery ceiling reached");
            }
            delivery.nack(requeue).await
        }
    };

    if let Err(e) = settled {
        tracing::error!(error = %e, "Failed to settle delivery");
    }
}
