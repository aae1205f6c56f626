// crates/product/src/application/list_products/list_products_use_case.rs

use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::list_products::{ListProductsCommand, ProductPage};
use crate::domain::repositories::ProductRepository;

pub struct ListProductsUseCase {
    repo: Arc<dyn ProductRepository>,
}

impl ListProductsUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, cmd: ListProductsCommand) -> Result<ProductPage> {
        let limit = cmd.effective_limit();
        let offset = cmd.effective_offset()?;

        let (products, total) = self.repo.products(cmd.owner, limit, offset).await?;

        Ok(ProductPage::new(products, limit, offset, total))
    }
}
