// crates/shared-kernel/src/domain/mod.rs

pub mod entities;
pub mod repositories;
pub mod value_objects;
