// crates/shared-kernel/src/infrastructure/amqp/messaging/amqp_message_producer.rs

use crate::application::ports::MessageProducer;
use crate::errors::AppResult;
use async_trait::async_trait;
use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel};

/// Mode de livraison AMQP "persistent"
const PERSISTENT: u8 = 2;

pub struct AmqpMessageProducer {
    channel: Channel,
    queue: String,
}

impl AmqpMessageProducer {
    pub(crate) fn new(channel: Channel, queue: String) -> Self {
        Self { channel, queue }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }
}

#[async_trait]
impl MessageProducer for AmqpMessageProducer {
    async fn publish(&self, payload: &[u8]) -> AppResult<()> {
        let properties = BasicProperties::default()
            .with_content_type("application/json".into())
            .with_delivery_mode(PERSISTENT);

        // Exchange par défaut : la routing key est le nom de la file.
        // Pas de publisher confirm : Ok = remis au canal, sans garantie de livraison.
        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await?;

        Ok(())
    }
}
