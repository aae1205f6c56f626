// crates/shared-kernel/src/infrastructure/amqp/messaging/amqp_message_consumer.rs

use crate::application::ports::{Delivery, MessageConsumer, MessageHandler};
use crate::application::workers::WorkerPool;
use crate::errors::{AppError, AppResult};
use crate::infrastructure::amqp::messaging::AmqpDelivery;
use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::options::{BasicCancelOptions, BasicConsumeOptions};
use lapin::types::FieldTable;
use lapin::Channel;
use tokio_util::sync::CancellationToken;

pub struct AmqpMessageConsumer {
    channel: Channel,
    queue: String,
    consumer_tag: String,
    pool: WorkerPool,
    shutdown_token: CancellationToken,
}

impl AmqpMessageConsumer {
    pub(crate) fn new(channel: Channel, queue: String, consumer_tag: String, pool: WorkerPool) -> Self {
        Self {
            channel,
            queue,
            consumer_tag,
            pool,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Arrête la réception. `consume` rend la main après le drain.
    pub fn stop(&self) {
        tracing::info!(queue = %self.queue, "Signaling AMQP consumer to stop...");
        self.shutdown_token.cancel();
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }
}

#[async_trait]
impl MessageConsumer for AmqpMessageConsumer {
    async fn consume(&self, handler: MessageHandler) -> AppResult<()> {
        // Ack manuel : no_ack = false
        let consumer = self
            .channel
            .basic_consume(
                &self.queue,
                &self.consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        tracing::info!(
            queue = %self.queue,
            workers = self.pool.size(),
            "AMQP consumer started"
        );

        let deliveries = consumer
            .map(|item| {
                item.map(|d| Box::new(AmqpDelivery::new(d)) as Box<dyn Delivery>)
                    .map_err(AppError::from)
            })
            .boxed();

        let outcome = self
            .pool
            .run(deliveries, handler, self.shutdown_token.clone())
            .await;

        // Tout est acquitté : les messages encore en prefetch retournent
        // dans la file à la fermeture du canal.
        if let Err(e) = self
            .channel
            .basic_cancel(&self.consumer_tag, BasicCancelOptions::default())
            .await
        {
            tracing::warn!(error = %e, "Failed to cancel AMQP consumer");
        }
        if let Err(e) = self.channel.close(200, "consumer stopped").await {
            tracing::warn!(error = %e, "Failed to close AMQP channel");
        }

        tracing::info!(queue = %self.queue, "AMQP consumer loop stopped.");
        outcome
    }
}
