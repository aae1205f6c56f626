// crates/product/src/application/list_products/mod.rs

mod list_products_command;
mod list_products_use_case;
mod product_page;

pub use list_products_command::ListProductsCommand;
pub use list_products_use_case::ListProductsUseCase;
pub use product_page::ProductPage;
