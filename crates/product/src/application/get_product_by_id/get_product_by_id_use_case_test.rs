// crates/product/src/application/get_product_by_id/get_product_by_id_use_case_test.rs

#[cfg(test)]
mod tests {
    use crate::application::cache::ProductCache;
    use crate::application::get_product_by_id::{GetProductByIdCommand, GetProductByIdUseCase};
    use crate::domain::entities::{NewProduct, Product};
    use crate::domain::repositories::ProductRepositoryStub;
    use crate::domain::value_objects::{Marketplace, ProductId, ProductTitle, UserId};
    use chrono::Utc;
    use shared_kernel::domain::repositories::CacheRepositoryStub;
    use shared_kernel::domain::value_objects::Url;
    use shared_kernel::errors::DomainError;
    use std::sync::Arc;
    use std::time::Duration;

    fn mug(id: i64) -> Product {
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

    fn cmd(id: i64) -> GetProductByIdCommand {
        GetProductByIdCommand {
            product_id: ProductId::from_raw(id),
        }
    }

    fn setup(
        repo: ProductRepositoryStub,
        cache: CacheRepositoryStub,
    ) -> (GetProductByIdUseCase, Arc<ProductRepositoryStub>, Arc<CacheRepositoryStub>) {
        let repo = Arc::new(repo);
        let cache = Arc::new(cache);
        let use_case = GetProductByIdUseCase::new(
            repo.clone(),
            ProductCache::new(cache.clone(), ProductCache::DEFAULT_TTL),
        );
        (use_case, repo, cache)
    }

    #[tokio::test]
    async fn test_cache_hit_never_queries_store() {
        let cached = mug(42);
        let cache = CacheRepositoryStub::default();
        cache
            .storage
            .lock()
            .unwrap()
            .insert("product:42".into(), serde_json::to_string(&cached).unwrap());
        let (use_case, repo, _cache) = setup(ProductRepositoryStub::default(), cache);

        let product = use_case.execute(cmd(42)).await.unwrap();

        assert_eq!(product, cached);
        assert_eq!(repo.reads(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_once_and_fills_cache() {
        let (use_case, repo, cache) = setup(ProductRepositoryStub::with_products(vec![mug(42)]), CacheRepositoryStub::default());

        let product = use_case.execute(cmd(42)).await.unwrap();

        assert_eq!(product.id().as_i64(), 42);
        assert_eq!(repo.reads(), 1);
        assert!(cache.raw("product:42").unwrap().contains("\"Mug\""));

        // La lecture suivante est servie par le cache
        use_case.execute(cmd(42)).await.unwrap();
        assert_eq!(repo.reads(), 1);
    }

    #[tokio::test]
    async fn test_store_miss_is_not_found() {
        let (use_case, _repo, cache) = setup(ProductRepositoryStub::default(), CacheRepositoryStub::default());

        let result = use_case.execute(cmd(404)).await;

        assert!(matches!(result, Err(DomainError::NotFound { entity: "Product", .. })));
        assert!(!cache.contains("product:404"));
    }

    #[tokio::test]
    async fn test_cache_transport_error_propagates() {
        let (use_case, repo, _cache) = setup(ProductRepositoryStub::with_products(vec![mug(42)]), CacheRepositoryStub::down());

        let result = use_case.execute(cmd(42)).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(repo.reads(), 0, "a cache outage is not a miss");
    }

    #[tokio::test]
    async fn test_repopulation_failure_is_swallowed() {
        let cache = CacheRepositoryStub {
            fail_writes: true,
            ..Default::default()
        };
        let (use_case, repo, _cache) = setup(ProductRepositoryStub::with_products(vec![mug(42)]), cache);

        let product = use_case.execute(cmd(42)).await.unwrap();

        assert_eq!(product.id().as_i64(), 42);
        assert_eq!(repo.reads(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_cache_entry_is_refreshed_from_store() {
        let cache = CacheRepositoryStub::default();
        cache
            .storage
            .lock()
            .unwrap()
            .insert("product:42".into(), "{{invalid_json}}".into());
        let (use_case, repo, cache) = setup(ProductRepositoryStub::with_products(vec![mug(42)]), cache);

        let product = use_case.execute(cmd(42)).await.unwrap();

        assert_eq!(product.id().as_i64(), 42);
        assert_eq!(repo.reads(), 1);
        assert!(serde_json::from_str::<Product>(&cache.raw("product:42").unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_store_read() {
        let repo = ProductRepositoryStub::with_products(vec![mug(42)])
            .with_read_delay(Duration::from_millis(50));
        let (use_case, repo, _cache) = setup(repo, CacheRepositoryStub::default());
        let use_case = Arc::new(use_case);

        let mut handles = vec![];
        for _ in 0..10 {
            let uc = Arc::clone(&use_case);
            handles.push(tokio::spawn(async move { uc.execute(cmd(42)).await }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(repo.reads(), 1, "singleflight should deduplicate store reads");
    }
}
