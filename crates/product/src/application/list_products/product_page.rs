// crates/product/src/application/list_products/product_page.rs

use serde::Serialize;

use crate::domain::entities::Product;

#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, limit: i64, offset: i64, total: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        let has_more = offset + (products.len() as i64) < total;

        Self {
            products,
            limit,
            offset,
            total,
            total_pages,
            has_more,
        }
    }
}
