// crates/product/src/application/workers/enrichment_worker.rs

use futures_util::FutureExt;
use shared_kernel::application::ports::{MessageConsumer, MessageHandler};
use shared_kernel::errors::{AppError, AppResult};
use std::sync::Arc;

use crate::application::apply_enrichment_result::ApplyEnrichmentResultUseCase;

/// Consomme la file des résultats de scraping et les applique en base.
/// L'acquittement est délégué au pool : `Ok` = ack, `Err` = nack.
pub struct EnrichmentWorker {
    consumer: Arc<dyn MessageConsumer>,
    use_case: Arc<ApplyEnrichmentResultUseCase>,
}

impl EnrichmentWorker {
    pub fn new(consumer: Arc<dyn MessageConsumer>, use_case: Arc<ApplyEnrichmentResultUseCase>) -> Self {
        Self { consumer, use_case }
    }

    pub fn handler(&self) -> MessageHandler {
        let use_case = Arc::clone(&self.use_case);

        Arc::new(move |payload: Vec<u8>| {
            let use_case = Arc::clone(&use_case);
            async move {
                use_case.handle_payload(&payload).await.map_err(|e| {
                    tracing::warn!(error = %e, "Enrichment result rejected");
                    AppError::from(e)
                })
            }
            .boxed()
        })
    }

    /// Bloque jusqu'à l'arrêt du consumer et la fin du drain.
    pub async fn start(&self) -> AppResult<()> {
        tracing::info!("Enrichment worker started");
        let outcome = self.consumer.consume(self.handler()).await;
        tracing::info!("Enrichment worker stopped");
        outcome
    }
}
