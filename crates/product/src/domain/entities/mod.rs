// crates/product/src/domain/entities/mod.rs

mod product;
pub use product::{NewProduct, Product};
