// crates/product/src/domain/repositories/product_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_kernel::errors::Result;

use crate::domain::entities::{NewProduct, Product};
use crate::domain::value_objects::{Price, ProductId, UserId};

/// Source de vérité des produits suivis.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// `AlreadyExists` si le couple (utilisateur, url) est déjà suivi.
    async fn save_product(&self, product: &NewProduct) -> Result<ProductId>;

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// UPDATE atomique : prix, stock, `last_checked = now()`.
    /// `NotFound` si aucune ligne ne correspond.
    async fn update_parsed_data(&self, id: ProductId, price: Price, in_stock: bool) -> Result<()>;

    /// Suppression limitée au propriétaire. `NotFound` sinon.
    async fn delete_product(&self, id: ProductId, owner: UserId) -> Result<()>;

    /// Page de produits (plus récents d'abord) et total pour ce propriétaire.
    async fn products(&self, owner: UserId, limit: i64, offset: i64) -> Result<(Vec<Product>, i64)>;

    /// Réserve jusqu'à `limit` produits à republier : jamais enrichis ou
    /// vérifiés avant `stale_before`, et non publiés depuis `requeue_before`.
    /// Les lignes rendues sont marquées comme publiées maintenant.
    async fn claim_due_for_refresh(
        &self,
        stale_before: DateTime<Utc>,
        requeue_before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Product>>;
}
