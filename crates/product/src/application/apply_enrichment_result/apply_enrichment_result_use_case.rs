// crates/product/src/application/apply_enrichment_result/apply_enrichment_result_use_case.rs

use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::cache::ProductCache;
use crate::domain::messages::EnrichmentResult;
use crate::domain::repositories::ProductRepository;

/// Applique un résultat de scraping. Idempotent : rejouer le même message
/// produit le même état, seul `last_checked` avance.
pub struct ApplyEnrichmentResultUseCase {
    repo: Arc<dyn ProductRepository>,
    cache: Option<ProductCache>,
}

impl ApplyEnrichmentResultUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo, cache: None }
    }

    /// Invalide l'entrée de cache après chaque mise à jour.
    pub fn with_cache(mut self, cache: ProductCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn execute(&self, result: EnrichmentResult) -> Result<()> {
        self.repo
            .update_parsed_data(result.id, result.price, result.in_stock)
            .await?;

        tracing::info!(
            product_id = %result.id,
            price = %result.price,
            in_stock = result.in_stock,
            "Enrichment result applied"
        );

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(result.id).await {
                tracing::warn!(product_id = %result.id, error = %e, "Failed to invalidate cache");
            }
        }

        Ok(())
    }

    /// Point d'entrée du worker : décodage puis application.
    pub async fn handle_payload(&self, payload: &[u8]) -> Result<()> {
        let result = EnrichmentResult::decode(payload)?;
        self.execute(result).await
    }
}
