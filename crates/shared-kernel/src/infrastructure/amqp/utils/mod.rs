// crates/shared-kernel/src/infrastructure/amqp/utils/mod.rs

#[cfg(feature = "test-utils")]
mod amqp_test_context;

#[cfg(feature = "test-utils")]
pub use amqp_test_context::AmqpTestContext;
