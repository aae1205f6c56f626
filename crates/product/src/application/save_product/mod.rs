// crates/product/src/application/save_product/mod.rs

mod save_product_command;
mod save_product_use_case;

pub use save_product_command::SaveProductCommand;
pub use save_product_use_case::SaveProductUseCase;
