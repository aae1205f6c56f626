// crates/product/src/application/get_product_by_id/get_product_by_id_use_case.rs

use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::errors::{DomainError, Result};
use shared_kernel::infrastructure::concurrency::Singleflight;
use std::sync::Arc;

use crate::application::cache::ProductCache;
use crate::application::get_product_by_id::GetProductByIdCommand;
use crate::domain::entities::Product;
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::ProductId;

pub struct GetProductByIdUseCase {
    repo: Arc<dyn ProductRepository>,
    cache: ProductCache,
    sf: Singleflight<ProductId, Product, DomainError>,
}

impl GetProductByIdUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>, cache: ProductCache) -> Self {
        Self {
            repo,
            cache,
            sf: Singleflight::new(),
        }
    }

    pub async fn execute(&self, cmd: GetProductByIdCommand) -> Result<Product> {
        let id = cmd.product_id;

        // 1. Cache. Seul "absent" déclenche la lecture en base,
        // une erreur de transport remonte telle quelle.
        if let Some(product) = self.cache.get(id).await? {
            tracing::debug!(product_id = %id, "Cache hit");
            return Ok(product);
        }

        // 2. Miss : une seule lecture Postgres par id, même sous concurrence
        let repo = Arc::clone(&self.repo);
        let cache = self.cache.clone();

        self.sf
            .execute(id, || async move {
                let product = repo.product_by_id(id).await?.ok_or_not_found(id)?;

                // 3. Remplissage best-effort
                if let Err(e) = cache.set(&product).await {
                    tracing::warn!(product_id = %id, error = %e, "Failed to repopulate cache");
                }

                Ok(product)
            })
            .await
    }
}
