// crates/shared-kernel/src/domain/repositories/mod.rs

mod cache_repository;
pub use cache_repository::CacheRepository;

#[cfg(any(test, feature = "test-utils"))]
mod cache_repository_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use cache_repository_stub::CacheRepositoryStub;
