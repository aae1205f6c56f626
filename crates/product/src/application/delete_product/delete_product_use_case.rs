// crates/product/src/application/delete_product/delete_product_use_case.rs

use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::cache::ProductCache;
use crate::application::delete_product::DeleteProductCommand;
use crate::domain::repositories::ProductRepository;

pub struct DeleteProductUseCase {
    repo: Arc<dyn ProductRepository>,
    cache: ProductCache,
}

impl DeleteProductUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>, cache: ProductCache) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, cmd: DeleteProductCommand) -> Result<()> {
        self.repo.delete_product(cmd.product_id, cmd.owner).await?;

        tracing::info!(product_id = %cmd.product_id, user_id = %cmd.owner, "Product deleted");

        // Le TTL borne la fenêtre si l'invalidation échoue
        if let Err(e) = self.cache.delete(cmd.product_id).await {
            tracing::warn!(product_id = %cmd.product_id, error = %e, "Failed to invalidate cache");
        }

        Ok(())
    }
}
