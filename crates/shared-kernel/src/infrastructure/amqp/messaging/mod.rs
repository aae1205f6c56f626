// crates/shared-kernel/src/infrastructure/amqp/messaging/mod.rs

mod amqp_delivery;
mod amqp_message_consumer;
mod amqp_message_producer;

pub use amqp_delivery::AmqpDelivery;
pub use amqp_message_consumer::AmqpMessageConsumer;
pub use amqp_message_producer::AmqpMessageProducer;
