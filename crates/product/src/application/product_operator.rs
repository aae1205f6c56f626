// crates/product/src/application/product_operator.rs

use shared_kernel::application::ports::MessageProducer;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::cache::ProductCache;
use crate::application::delete_product::{DeleteProductCommand, DeleteProductUseCase};
use crate::application::get_product_by_id::{GetProductByIdCommand, GetProductByIdUseCase};
use crate::application::list_products::{ListProductsCommand, ListProductsUseCase, ProductPage};
use crate::application::save_product::{SaveProductCommand, SaveProductUseCase};
use crate::domain::entities::Product;
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::{ProductId, UserId};

/// Point d'entrée de la couche HTTP : écriture + publication, lecture
/// via le cache, suppression et listing.
pub struct ProductOperator {
    save: SaveProductUseCase,
    get: GetProductByIdUseCase,
    delete: DeleteProductUseCase,
    list: ListProductsUseCase,
}

impl ProductOperator {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        cache: ProductCache,
        producer: Arc<dyn MessageProducer>,
    ) -> Self {
        Self {
            save: SaveProductUseCase::new(Arc::clone(&repo), producer),
            get: GetProductByIdUseCase::new(Arc::clone(&repo), cache.clone()),
            delete: DeleteProductUseCase::new(Arc::clone(&repo), cache),
            list: ListProductsUseCase::new(repo),
        }
    }

    pub async fn save_product(&self, cmd: SaveProductCommand) -> Result<ProductId> {
        self.save.execute(cmd).await
    }

    pub async fn product_by_id(&self, product_id: ProductId) -> Result<Product> {
        self.get.execute(GetProductByIdCommand { product_id }).await
    }

    pub async fn delete_product(&self, product_id: ProductId, owner: UserId) -> Result<()> {
        self.delete
            .execute(DeleteProductCommand { product_id, owner })
            .await
    }

    pub async fn products(&self, cmd: ListProductsCommand) -> Result<ProductPage> {
        self.list.execute(cmd).await
    }
}
