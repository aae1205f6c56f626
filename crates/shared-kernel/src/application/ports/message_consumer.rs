// crates/shared-kernel/src/application/ports/message_consumer.rs

use crate::errors::AppResult;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use std::sync::Arc;

/// Traitement d'un payload. `Err` (ou panic) = message re-livré.
pub type MessageHandler = Arc<dyn Fn(Vec<u8>) -> BoxFuture<'static, AppResult<()>> + Send + Sync>;

/// Un message reçu, à acquitter exactement une fois.
#[async_trait]
pub trait Delivery: Send + Sync {
    fn payload(&self) -> &[u8];

    /// Nombre de livraisons précédentes connues du broker (0 = première).
    fn redelivery_count(&self) -> u32;

    async fn ack(&self) -> AppResult<()>;

    async fn nack(&self, requeue: bool) -> AppResult<()>;
}

pub type DeliveryStream = BoxStream<'static, AppResult<Box<dyn Delivery>>>;

#[async_trait]
pub trait MessageConsumer: Send + Sync {
    /// Consomme jusqu'à l'arrêt, puis attend la fin des handlers en vol.
    async fn consume(&self, handler: MessageHandler) -> AppResult<()>;
}
