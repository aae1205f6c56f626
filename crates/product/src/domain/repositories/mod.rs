// crates/product/src/domain/repositories/mod.rs

mod product_repository;
pub use product_repository::ProductRepository;

#[cfg(any(test, feature = "test-utils"))]
mod product_repository_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository_stub::ProductRepositoryStub;
