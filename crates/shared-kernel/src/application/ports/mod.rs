// crates/shared-kernel/src/application/ports/mod.rs

mod message_consumer;
mod message_producer;

pub use message_consumer::{Delivery, DeliveryStream, MessageConsumer, MessageHandler};
pub use message_producer::{MessageProducer, MessageProducerExt};

#[cfg(any(test, feature = "test-utils"))]
mod message_broker_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use message_broker_stub::{InMemoryMessageConsumer, MessageProducerStub, Settlement};
