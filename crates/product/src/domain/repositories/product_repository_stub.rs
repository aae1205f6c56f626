// crates/product/src/domain/repositories/product_repository_stub.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::errors::{DomainError, Result};

use crate::domain::entities::{NewProduct, Product};
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::{Price, ProductId, UserId};

/// Stockage en mémoire avec les mêmes contrats que Postgres.
pub struct ProductRepositoryStub {
    pub products: Mutex<HashMap<ProductId, Product>>,
    pub enqueued_at: Mutex<HashMap<ProductId, DateTime<Utc>>>,
    pub error_to_return: Mutex<Option<DomainError>>,
    /// Latence simulée sur les lectures (tests de dédoublonnage)
    pub read_delay: Option<Duration>,
    pub read_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    next_id: AtomicI64,
}

impl Default for ProductRepositoryStub {
    fn default() -> Self {
        Self {
            products: Mutex::new(HashMap::new()),
            enqueued_at: Mutex::new(HashMap::new()),
            error_to_return: Mutex::new(None),
            read_delay: None,
            read_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            next_id: AtomicI64::new(1),
        }
    }
}

impl ProductRepositoryStub {
    pub fn with_products(products: Vec<Product>) -> Self {
        let stub = Self::default();
        let max_id = products.iter().map(|p| p.id().as_i64()).max().unwrap_or(0);
        stub.next_id.store(max_id + 1, Ordering::SeqCst);
        stub.products
            .lock()
            .unwrap()
            .extend(products.into_iter().map(|p| (p.id(), p)));
        stub
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.error_to_return.lock().unwrap() = Some(error);
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.products.lock().unwrap().get(&id).cloned()
    }

    pub fn reads(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    fn injected_error(&self) -> Result<()> {
        match self.error_to_return.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryStub {
    async fn save_product(&self, new_product: &NewProduct) -> Result<ProductId> {
        self.injected_error()?;
        let mut products = self.products.lock().unwrap();

        let duplicate = products
            .values()
            .any(|p| p.user_id() == new_product.user_id() && p.url() == new_product.url());
        if duplicate {
            return Err(Product::already_exists(
                "products_user_id_url_key",
                new_product.url().to_string(),
            ));
        }

        let id = ProductId::from_raw(self.next_id.fetch_add(1, Ordering::SeqCst));
        products.insert(id, Product::created(id, new_product.clone(), Utc::now()));
        Ok(id)
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        self.injected_error()?;
        Ok(self.get(id))
    }

    async fn update_parsed_data(&self, id: ProductId, price: Price, in_stock: bool) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.injected_error()?;

        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(&id).ok_or_else(|| Product::not_found(id))?;
        product.apply_parsed_data(price, in_stock, Utc::now());
        Ok(())
    }

    async fn delete_product(&self, id: ProductId, owner: UserId) -> Result<()> {
        self.injected_error()?;
        let mut products = self.products.lock().unwrap();

        match products.get(&id) {
            Some(p) if p.user_id() == owner => {
                products.remove(&id);
                Ok(())
            }
            _ => Err(Product::not_found(id)),
        }
    }

    async fn products(&self, owner: UserId, limit: i64, offset: i64) -> Result<(Vec<Product>, i64)> {
        self.injected_error()?;
        let products = self.products.lock().unwrap();

        let mut owned: Vec<Product> = products
            .values()
            .filter(|p| p.user_id() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });

        let total = owned.len() as i64;
        let page = owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn claim_due_for_refresh(
        &self,
        stale_before: DateTime<Utc>,
        requeue_before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Product>> {
        self.injected_error()?;
        let products = self.products.lock().unwrap();
        let mut enqueued_at = self.enqueued_at.lock().unwrap();

        let mut due: Vec<Product> = products
            .values()
            .filter(|p| p.last_checked().map_or(true, |checked| checked < stale_before))
            .filter(|p| {
                let last_enqueued = enqueued_at.get(&p.id()).copied().unwrap_or(p.created_at());
                last_enqueued < requeue_before
            })
            .cloned()
            .collect();
        due.sort_by_key(|p| p.last_checked().unwrap_or(p.created_at()));
        due.truncate(limit as usize);

        let now = Utc::now();
        for product in &due {
            enqueued_at.insert(product.id(), now);
        }

        Ok(due)
    }
}
