// crates/product/src/infrastructure/postgres/repositories/mod.rs

mod postgres_product_repository;
pub use postgres_product_repository::PostgresProductRepository;
