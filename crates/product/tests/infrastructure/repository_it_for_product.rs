// crates/product/tests/infrastructure/repository_it_for_product.rs

use chrono::{Duration, Utc};
use product::domain::repositories::ProductRepository;
use product::domain::value_objects::{Marketplace, Price, ProductId, UserId};
use product::infrastructure::postgres::repositories::PostgresProductRepository;
use shared_kernel::errors::DomainError;
use shared_kernel::infrastructure::postgres::utils::PostgresTestContext;

use crate::common::{new_product, setup_postgres_test_db};

async fn setup_context() -> (PostgresProductRepository, PostgresTestContext) {
    let ctx = setup_postgres_test_db().await;
    let repo = PostgresProductRepository::new(ctx.pool());
    (repo, ctx)
}

#[tokio::test]
async fn test_save_then_read_returns_unenriched_product() {
    let (repo, _ctx) = setup_context().await;

    let id = repo
        .save_product(&new_product(7, "https://etsy.com/listing/1", "Mug"))
        .await
        .expect("Save failed");
    let product = repo.product_by_id(id).await.unwrap().expect("Should exist");

    assert_eq!(product.url().as_str(), "https://etsy.com/listing/1");
    assert_eq!(product.title().as_str(), "Mug");
    assert_eq!(product.marketplace(), Marketplace::Etsy);
    assert_eq!(product.price(), Price::ZERO);
    assert!(!product.in_stock());
    assert!(product.last_checked().is_none());
}

#[tokio::test]
async fn test_duplicate_url_for_same_owner_is_a_conflict() {
    let (repo, _ctx) = setup_context().await;
    let mug = new_product(7, "https://etsy.com/listing/1", "Mug");

    let first = repo.save_product(&mug).await.unwrap();
    let second = repo.save_product(&mug).await;

    match second {
        Err(DomainError::AlreadyExists { field, value, .. }) => {
            assert_eq!(field, "url");
            assert_eq!(value, "https://etsy.com/listing/1");
        }
        other => panic!("expected a conflict, got {:?}", other),
    }
    assert!(repo.product_by_id(first).await.unwrap().is_some());

    // Un autre utilisateur peut suivre la même URL
    repo.save_product(&new_product(8, "https://etsy.com/listing/1", "Mug"))
        .await
        .expect("Other owner should be allowed");
}

#[tokio::test]
async fn test_update_parsed_data_sets_last_checked() {
    let (repo, _ctx) = setup_context().await;
    let id = repo
        .save_product(&new_product(7, "https://www.ebay.com/itm/1", "Lamp"))
        .await
        .unwrap();

    repo.update_parsed_data(id, Price::try_new(1999).unwrap(), true).await.unwrap();
    repo.update_parsed_data(id, Price::try_new(1999).unwrap(), true).await.unwrap();

    let product = repo.product_by_id(id).await.unwrap().unwrap();
    assert_eq!(product.price().value(), 1999);
    assert!(product.in_stock());
    assert!(product.last_checked().is_some());
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found() {
    let (repo, _ctx) = setup_context().await;

    let result = repo
        .update_parsed_data(ProductId::from_raw(404), Price::ZERO, false)
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_is_scoped_to_owner() {
    let (repo, _ctx) = setup_context().await;
    let id = repo
        .save_product(&new_product(7, "https://etsy.com/listing/1", "Mug"))
        .await
        .unwrap();

    let stranger = repo.delete_product(id, UserId::from_raw(8)).await;
    assert!(matches!(stranger, Err(DomainError::NotFound { .. })));

    repo.delete_product(id, UserId::from_raw(7)).await.unwrap();
    assert!(repo.product_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_listing_pages_newest_first() {
    let (repo, _ctx) = setup_context().await;
    for i in 1..=5 {
        repo.save_product(&new_product(7, &format!("https://etsy.com/listing/{i}"), &format!("Item {i}")))
            .await
            .unwrap();
    }
    repo.save_product(&new_product(8, "https://etsy.com/listing/99", "Other"))
        .await
        .unwrap();

    let (page, total) = repo.products(UserId::from_raw(7), 2, 0).await.unwrap();
    let (last, _) = repo.products(UserId::from_raw(7), 2, 4).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title().as_str(), "Item 5");
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].title().as_str(), "Item 1");
}

#[tokio::test]
async fn test_claim_due_for_refresh_marks_rows() {
    let (repo, _ctx) = setup_context().await;
    let never_enriched = repo
        .save_product(&new_product(7, "https://etsy.com/listing/1", "Mug"))
        .await
        .unwrap();
    let fresh = repo
        .save_product(&new_product(7, "https://etsy.com/listing/2", "Cup"))
        .await
        .unwrap();
    repo.update_parsed_data(fresh, Price::try_new(500).unwrap(), true)
        .await
        .unwrap();

    // Fenêtres dans le futur : tout ce qui existe est "ancien"
    let future = Utc::now() + Duration::minutes(1);
    let stale_before = Utc::now() - Duration::hours(1);

    let claimed = repo.claim_due_for_refresh(stale_before, future, 10).await.unwrap();
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].id(), never_enriched);

    // Déjà réclamé : invisible tant que la fenêtre de grâce n'est pas passée
    let again = repo
        .claim_due_for_refresh(stale_before, Utc::now() - Duration::seconds(30), 10)
        .await
        .unwrap();
    assert!(again.is_empty());
}
