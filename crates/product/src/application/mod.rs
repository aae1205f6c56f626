// crates/product/src/application/mod.rs

pub mod apply_enrichment_result;
pub mod cache;
pub mod delete_product;
pub mod get_product_by_id;
pub mod list_products;
pub mod save_product;
pub mod workers;

mod product_operator;
pub use product_operator::ProductOperator;
