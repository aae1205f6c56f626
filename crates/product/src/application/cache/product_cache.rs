// crates/product/src/application/cache/product_cache.rs

use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductId;

/// Vue typée du cache : `product:<id>` -> snapshot JSON du produit.
#[derive(Clone)]
pub struct ProductCache {
    cache: Arc<dyn CacheRepository>,
    ttl: Duration,
}

impl ProductCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    pub fn new(cache: Arc<dyn CacheRepository>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn key(id: ProductId) -> String {
        format!("product:{}", id)
    }

    /// `Ok(None)` = absent du cache. Un snapshot illisible est traité comme
    /// absent, il sera écrasé au prochain remplissage.
    pub async fn get(&self, id: ProductId) -> AppResult<Option<Product>> {
        let Some(json) = self.cache.get(&Self::key(id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Product>(&json) {
            Ok(product) => Ok(Some(product)),
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "Corrupted cache entry, ignoring");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, product: &Product) -> AppResult<()> {
        let json = serde_json::to_string(product).map_err(|e| {
            AppError::new(ErrorCode::InternalError, format!("Failed to serialize product: {}", e))
        })?;

        self.cache
            .set(&Self::key(product.id()), &json, Some(self.ttl))
            .await
    }

    pub async fn delete(&self, id: ProductId) -> AppResult<()> {
        self.cache.delete(&Self::key(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewProduct;
    use crate::domain::value_objects::{Marketplace, ProductTitle, UserId};
    use chrono::Utc;
    use shared_kernel::domain::repositories::CacheRepositoryStub;
    use shared_kernel::domain::value_objects::Url;

    fn product(id: i64) -> Product {
        Product::created(
            ProductId::from_raw(id),
            NewProduct::new(
                UserId::from_raw(7),
                Url::try_new("https://etsy.com/listing/1").unwrap(),
                ProductTitle::try_new("Mug").unwrap(),
                Marketplace::Etsy,
            ),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_set_uses_product_key_and_ttl() {
        let stub = Arc::new(CacheRepositoryStub::default());
        let cache = ProductCache::new(stub.clone(), Duration::from_secs(90));
        let mug = product(42);

        cache.set(&mug).await.unwrap();

        assert!(stub.contains("product:42"));
        assert_eq!(
            stub.ttls.lock().unwrap().get("product:42"),
            Some(&Some(Duration::from_secs(90)))
        );
        assert_eq!(cache.get(mug.id()).await.unwrap(), Some(mug));
    }

    #[tokio::test]
    async fn test_corrupted_entry_is_a_miss() {
        let stub = Arc::new(CacheRepositoryStub::default());
        stub.storage
            .lock()
            .unwrap()
            .insert("product:42".into(), "{not json".into());
        let cache = ProductCache::new(stub, ProductCache::DEFAULT_TTL);

        assert_eq!(cache.get(ProductId::from_raw(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transport_error_is_not_a_miss() {
        let cache = ProductCache::new(Arc::new(CacheRepositoryStub::down()), ProductCache::DEFAULT_TTL);

        assert!(cache.get(ProductId::from_raw(42)).await.is_err());
    }
}
