// crates/product/src/application/delete_product/mod.rs

mod delete_product_command;
mod delete_product_use_case;

pub use delete_product_command::DeleteProductCommand;
pub use delete_product_use_case::DeleteProductUseCase;
