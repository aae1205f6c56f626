// crates/product/src/infrastructure/postgres/rows/mod.rs

mod postgres_product_row;
pub use postgres_product_row::PostgresProductRow;
