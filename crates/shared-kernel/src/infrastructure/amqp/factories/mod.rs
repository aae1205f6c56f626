// crates/shared-kernel/src/infrastructure/amqp/factories/mod.rs

mod amqp_context;
mod amqp_context_builder;
mod queue_topology;

pub use amqp_context::AmqpContext;
pub use amqp_context_builder::AmqpContextBuilder;
pub use queue_topology::QueueTopology;
