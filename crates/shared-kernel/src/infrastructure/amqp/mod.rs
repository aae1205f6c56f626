// crates/shared-kernel/src/infrastructure/amqp/mod.rs

pub mod factories;
pub mod messaging;
pub mod utils;
