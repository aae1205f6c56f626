// crates/product/tests/common/mod.rs

mod fixtures;
mod setup_postgres_test_db;

pub use fixtures::new_product;
pub use setup_postgres_test_db::setup_postgres_test_db;
