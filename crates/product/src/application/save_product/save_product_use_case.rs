// crates/product/src/application/save_product/save_product_use_case.rs

use shared_kernel::application::ports::{MessageProducer, MessageProducerExt};
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::errors::{DomainError, Result};
use std::sync::Arc;

use crate::application::save_product::SaveProductCommand;
use crate::domain::entities::{NewProduct, Product};
use crate::domain::messages::EnrichmentRequest;
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::ProductId;

pub struct SaveProductUseCase {
    repo: Arc<dyn ProductRepository>,
    producer: Arc<dyn MessageProducer>,
}

impl SaveProductUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>, producer: Arc<dyn MessageProducer>) -> Self {
        Self { repo, producer }
    }

    /// Insère puis publie la demande d'enrichissement.
    /// Si la publication échoue, la ligne reste : `PublishFailed` porte l'id créé.
    pub async fn execute(&self, cmd: SaveProductCommand) -> Result<ProductId> {
        let new_product = NewProduct::new(cmd.user_id, cmd.url, cmd.title, cmd.marketplace);

        // 1. Persistance (23505 -> AlreadyExists)
        let id = self.repo.save_product(&new_product).await?;

        tracing::info!(
            product_id = %id,
            user_id = %new_product.user_id(),
            marketplace = %new_product.marketplace(),
            "Product saved"
        );

        // 2. Publication, pas de rollback
        let request = EnrichmentRequest::new(id, new_product.url().clone(), new_product.marketplace());

        if let Err(e) = self.producer.publish_json(&request).await {
            tracing::error!(product_id = %id, error = %e, "Failed to enqueue enrichment request");

            return Err(DomainError::PublishFailed {
                entity: Product::entity_name(),
                id: id.to_string(),
                reason: e.to_string(),
            });
        }

        Ok(id)
    }
}
