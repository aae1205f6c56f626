// crates/product/src/domain/entities/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::domain::value_objects::Url;

use crate::domain::value_objects::{Marketplace, Price, ProductId, ProductTitle, UserId};

/// Produit suivi. Titre, URL et marketplace sont figés à la création ;
/// prix, stock et `last_checked` ne bougent que via l'enrichissement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    user_id: UserId,
    url: Url,
    title: ProductTitle,
    marketplace: Marketplace,
    price: Price,
    in_stock: bool,
    last_checked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Reconstruction depuis le stockage (aucune validation)
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ProductId,
        user_id: UserId,
        url: Url,
        title: ProductTitle,
        marketplace: Marketplace,
        price: Price,
        in_stock: bool,
        last_checked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            url,
            title,
            marketplace,
            price,
            in_stock,
            last_checked,
            created_at,
            updated_at,
        }
    }

    /// État initial juste après l'insertion : pas encore enrichi.
    pub fn created(id: ProductId, new_product: NewProduct, at: DateTime<Utc>) -> Self {
        Self::restore(
            id,
            new_product.user_id,
            new_product.url,
            new_product.title,
            new_product.marketplace,
            Price::ZERO,
            false,
            None,
            at,
            at,
        )
    }

    /// Application d'un résultat d'enrichissement (dernier appliqué gagne).
    pub fn apply_parsed_data(&mut self, price: Price, in_stock: bool, at: DateTime<Utc>) {
        self.price = price;
        self.in_stock = in_stock;
        self.last_checked = Some(at);
        self.updated_at = at;
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> &ProductTitle {
        &self.title
    }

    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl EntityMetadata for Product {
    fn entity_name() -> &'static str {
        "Product"
    }

    fn map_constraint_to_field(constraint: &str) -> &'static str {
        match constraint {
            "products_user_id_url_key" => "url",
            "products_marketplace_check" => "marketplace",
            "products_price_check" => "price",
            _ => "unique_constraint",
        }
    }
}

/// Données d'un produit avant insertion (pas encore d'identifiant).
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    user_id: UserId,
    url: Url,
    title: ProductTitle,
    marketplace: Marketplace,
}

impl NewProduct {
    pub fn new(user_id: UserId, url: Url, title: ProductTitle, marketplace: Marketplace) -> Self {
        Self {
            user_id,
            url,
            title,
            marketplace,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> &ProductTitle {
        &self.title
    }

    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }
}
