// crates/product/src/domain/messages/enrichment_request.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::Url;

use crate::domain::entities::Product;
use crate::domain::value_objects::{Marketplace, ProductId};

/// Message sortant vers le service de scraping :
/// `{"id": 42, "url": "https://...", "marketplace": "etsy"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub id: ProductId,
    pub url: Url,
    pub marketplace: Marketplace,
}

impl EnrichmentRequest {
    pub fn new(id: ProductId, url: Url, marketplace: Marketplace) -> Self {
        Self { id, url, marketplace }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(product.id(), product.url().clone(), product.marketplace())
    }
}
