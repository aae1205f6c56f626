// crates/shared-kernel/src/application/ports/message_producer.rs

use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use serde::Serialize;

#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publie un payload brut sur la file configurée.
    /// Un `Ok` signifie que le broker a accepté le message.
    async fn publish(&self, payload: &[u8]) -> AppResult<()>;
}

/// Sérialisation JSON au-dessus de n'importe quel producer.
#[async_trait]
pub trait MessageProducerExt: MessageProducer {
    async fn publish_json<T: Serialize + Sync>(&self, message: &T) -> AppResult<()> {
        let payload = serde_json::to_vec(message).map_err(|e| {
            AppError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize message: {}", e),
            )
        })?;
        self.publish(&payload).await
    }
}

impl<P: MessageProducer + ?Sized> MessageProducerExt for P {}
