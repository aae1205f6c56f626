// crates/product/tests/infrastructure/cache_it_for_product.rs

use chrono::Utc;
use product::application::cache::ProductCache;
use product::domain::entities::Product;
use product::domain::value_objects::ProductId;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::infrastructure::redis::utils::RedisTestContext;
use std::time::Duration;

use crate::common::new_product;

#[tokio::test]
async fn test_product_snapshot_round_trip_and_expiry() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = ProductCache::new(ctx.cache(), Duration::from_secs(1));
    let mug = Product::created(
        ProductId::from_raw(42),
        new_product(7, "https://etsy.com/listing/1", "Mug"),
        Utc::now(),
    );

    assert_eq!(cache.get(mug.id()).await.unwrap(), None);

    cache.set(&mug).await.unwrap();
    assert_eq!(cache.get(mug.id()).await.unwrap(), Some(mug.clone()));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(cache.get(mug.id()).await.unwrap(), None, "entry should have expired");
}

#[tokio::test]
async fn test_delete_removes_entry() {
    let ctx = RedisTestContext::builder().build().await;
    let repository = ctx.repository();

    repository.set("product:1", "{}", None).await.unwrap();
    repository.delete("product:1").await.unwrap();

    assert_eq!(repository.get("product:1").await.unwrap(), None);
}
