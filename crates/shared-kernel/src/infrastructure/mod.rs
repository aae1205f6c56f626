// crates/shared-kernel/src/infrastructure/mod.rs

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "amqp")]
pub mod amqp;

#[cfg(feature = "concurrency")]
pub mod concurrency;

pub mod bootstrap;
pub mod telemetry;
