// crates/shared-kernel/src/infrastructure/amqp/factories/amqp_context.rs

use crate::application::workers::WorkerPool;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::amqp::factories::{AmqpContextBuilder, QueueTopology};
use crate::infrastructure::amqp::messaging::{AmqpMessageConsumer, AmqpMessageProducer};
use lapin::options::{BasicQosOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties};

pub struct AmqpContext {
    connection: Connection,
    url: String,
}

impl AmqpContext {
    /// Builder alimenté par `PRODUCT_AMQP_URL`
    pub fn builder() -> AppResult<AmqpContextBuilder> {
        AmqpContextBuilder::new()
    }

    pub fn builder_raw() -> AmqpContextBuilder {
        AmqpContextBuilder::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Producer sur un canal dédié, file classique.
    pub async fn producer(&self, queue: &str) -> AppResult<AmqpMessageProducer> {
        self.producer_with_topology(queue, QueueTopology::Classic).await
    }

    /// La topologie doit être celle du consumer de la file, sinon le broker
    /// refuse la seconde déclaration (PRECONDITION_FAILED).
    pub async fn producer_with_topology(
        &self,
        queue: &str,
        topology: QueueTopology,
    ) -> AppResult<AmqpMessageProducer> {
        let channel = self.connection.create_channel().await?;
        Self::declare_queue(&channel, queue, topology).await?;

        Ok(AmqpMessageProducer::new(channel, queue.to_string()))
    }

    /// Consumer sur un canal dédié. Le prefetch est aligné sur la taille
    /// du pool : le broker ne pousse jamais plus que ce qu'on peut traiter.
    /// Avec un plafond de re-livraisons, la file est une quorum queue
    /// dead-letterée vers `<file>.dlq`.
    pub async fn consumer(
        &self,
        queue: &str,
        consumer_tag: &str,
        pool: WorkerPool,
    ) -> AppResult<AmqpMessageConsumer> {
        let channel = self.connection.create_channel().await?;

        let prefetch = u16::try_from(pool.size()).map_err(|_| {
            AppError::new(
                ErrorCode::InternalError,
                format!("Worker pool size {} exceeds AMQP prefetch limit", pool.size()),
            )
        })?;
        channel.basic_qos(prefetch, BasicQosOptions::default()).await?;
        let topology = QueueTopology::for_ceiling(pool.max_redeliveries());
        Self::declare_queue(&channel, queue, topology).await?;

        Ok(AmqpMessageConsumer::new(
            channel,
            queue.to_string(),
            consumer_tag.to_string(),
            pool,
        ))
    }

    pub async fn close(&self) -> AppResult<()> {
        self.connection.close(200, "shutdown").await?;
        Ok(())
    }

    async fn declare_queue(channel: &Channel, queue: &str, topology: QueueTopology) -> AppResult<()> {
        let durable = || QueueDeclareOptions {
            durable: true,
            ..QueueDeclareOptions::default()
        };

        // La file de rebut existe avant que le premier rejet y soit routé
        if topology == QueueTopology::DeadLettered {
            let dead_letters = QueueTopology::dead_letter_queue(queue);
            channel
                .queue_declare(&dead_letters, durable(), FieldTable::default())
                .await?;
            tracing::info!(queue, dead_letters = %dead_letters, "Dead-letter queue declared");
        }

        channel
            .queue_declare(queue, durable(), topology.arguments(queue))
            .await?;
        Ok(())
    }

    pub(crate) async fn restore(builder: AmqpContextBuilder) -> AppResult<Self> {
        let properties = ConnectionProperties::default()
            .with_connection_name(builder.connection_name.clone().into());

        let connection = Connection::connect(&builder.url, properties)
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::InfrastructureFailure,
                    format!("AMQP Connection Failed: {}", e),
                )
            })?;

        tracing::info!(connection = %builder.connection_name, "AMQP connection ready");

        Ok(Self {
            connection,
            url: builder.url,
        })
    }
}
