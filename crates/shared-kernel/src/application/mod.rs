// crates/shared-kernel/src/application/mod.rs

pub mod ports;
pub mod workers;
