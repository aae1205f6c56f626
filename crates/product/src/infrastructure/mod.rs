// crates/product/src/infrastructure/mod.rs

pub mod bootstrap;
pub mod postgres;
