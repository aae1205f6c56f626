// crates/product/src/infrastructure/postgres/repositories/postgres_product_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_kernel::domain::entities::{ConflictValueExt, EntityMetadata};
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::postgres::SqlxErrorExt;
use sqlx::PgPool;

use crate::domain::entities::{NewProduct, Product};
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::{Price, ProductId, UserId};
use crate::infrastructure::postgres::rows::PostgresProductRow;

const PRODUCT_COLUMNS: &str = r#"
    id, user_id, url, title, marketplace, price, in_stock,
    last_checked, created_at, updated_at
"#;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save_product(&self, product: &NewProduct) -> Result<ProductId> {
        let sql = r#"
            INSERT INTO products (user_id, url, title, marketplace)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#;

        let id: i64 = sqlx::query_scalar(sql)
            .bind(product.user_id().as_i64())
            .bind(product.url().as_str())
            .bind(product.title().as_str())
            .bind(product.marketplace().as_str())
            .fetch_one(&self.pool)
            .await
            .map_domain::<Product>()
            .with_conflict_value(product.url().to_string())?;

        Ok(ProductId::from_raw(id))
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let row = sqlx::query_as::<_, PostgresProductRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_domain::<Product>()?;

        row.map(Product::try_from).transpose()
    }

    async fn update_parsed_data(&self, id: ProductId, price: Price, in_stock: bool) -> Result<()> {
        let sql = r#"
            UPDATE products
            SET price = $2, in_stock = $3, last_checked = NOW(), updated_at = NOW()
            WHERE id = $1
        "#;

        let result = sqlx::query(sql)
            .bind(id.as_i64())
            .bind(price.value())
            .bind(in_stock)
            .execute(&self.pool)
            .await
            .map_domain::<Product>()?;

        if result.rows_affected() == 0 {
            return Err(Product::not_found(id));
        }

        Ok(())
    }

    async fn delete_product(&self, id: ProductId, owner: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id.as_i64())
            .bind(owner.as_i64())
            .execute(&self.pool)
            .await
            .map_domain::<Product>()?;

        // Produit absent ou appartenant à un autre utilisateur : même réponse
        if result.rows_affected() == 0 {
            return Err(Product::not_found(id));
        }

        Ok(())
    }

    async fn products(&self, owner: UserId, limit: i64, offset: i64) -> Result<(Vec<Product>, i64)> {
        // Page et total lus dans le même snapshot
        let mut tx = self
            .pool
            .begin()
            .await
            .map_domain_infra("ProductListBegin")?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_domain_infra("ProductListReadOnly")?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, PostgresProductRow>(&sql)
            .bind(owner.as_i64())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await
            .map_domain::<Product>()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE user_id = $1")
            .bind(owner.as_i64())
            .fetch_one(&mut *tx)
            .await
            .map_domain::<Product>()?;

        tx.commit().await.map_domain_infra("ProductListCommit")?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((products, total))
    }

    async fn claim_due_for_refresh(
        &self,
        stale_before: DateTime<Utc>,
        requeue_before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Product>> {
        // SKIP LOCKED : deux schedulers ne réservent jamais la même ligne
        let sql = format!(
            r#"
            WITH due AS (
                SELECT id
                FROM products
                WHERE (last_checked IS NULL OR last_checked < $1)
                  AND COALESCE(last_enqueued_at, created_at) < $2
                ORDER BY COALESCE(last_checked, created_at)
                LIMIT $3
                FOR UPDATE SKIP LOCKED
            )
            UPDATE products
            SET last_enqueued_at = NOW()
            FROM due
            WHERE products.id = due.id
            RETURNING {}
            "#,
            qualified_columns("products")
        );

        let rows = sqlx::query_as::<_, PostgresProductRow>(&sql)
            .bind(stale_before)
            .bind(requeue_before)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_domain::<Product>()?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

/// `RETURNING` après un `UPDATE ... FROM` : colonnes préfixées par la table.
fn qualified_columns(table: &str) -> String {
    PRODUCT_COLUMNS
        .split(',')
        .map(|c| format!("{}.{}", table, c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
