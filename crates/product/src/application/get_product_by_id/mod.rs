// crates/product/src/application/get_product_by_id/mod.rs

mod get_product_by_id_command;
mod get_product_by_id_use_case;
mod get_product_by_id_use_case_test;

pub use get_product_by_id_command::GetProductByIdCommand;
pub use get_product_by_id_use_case::GetProductByIdUseCase;
