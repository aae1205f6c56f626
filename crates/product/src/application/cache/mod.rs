// crates/product/src/application/cache/mod.rs

mod product_cache;
pub use product_cache::ProductCache;
