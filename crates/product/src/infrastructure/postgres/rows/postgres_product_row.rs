// crates/product/src/infrastructure/postgres/rows/postgres_product_row.rs

use chrono::{DateTime, Utc};
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::{DomainError, Result};
use sqlx::FromRow;

use crate::domain::entities::Product;
use crate::domain::value_objects::{Marketplace, Price, ProductId, ProductTitle, UserId};

#[derive(FromRow, Debug)]
pub struct PostgresProductRow {
    pub id: i64,
    pub user_id: i64,
    pub url: String,
    pub title: String,
    pub marketplace: String,
    pub price: i64,
    pub in_stock: bool,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostgresProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: PostgresProductRow) -> Result<Self> {
        // La contrainte CHECK garantit l'enum, un échec ici est une corruption
        let marketplace: Marketplace = row.marketplace.parse().map_err(|_| {
            DomainError::Internal(format!("Unknown marketplace in database: {}", row.marketplace))
        })?;

        Ok(Product::restore(
            ProductId::from_raw(row.id),
            UserId::from_raw(row.user_id),
            Url::new_unchecked(row.url),
            ProductTitle::from_raw(row.title),
            marketplace,
            Price::from_raw(row.price),
            row.in_stock,
            row.last_checked,
            row.created_at,
            row.updated_at,
        ))
    }
}
