// crates/product/src/domain/mod.rs

pub mod entities;
pub mod messages;
pub mod repositories;
pub mod value_objects;
