// crates/shared-kernel/src/application/ports/message_broker_stub.rs

use crate::application::ports::{Delivery, MessageConsumer, MessageHandler, MessageProducer};
use crate::application::workers::WorkerPool;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// --- Producer ---

#[derive(Default)]
pub struct MessageProducerStub {
    pub published: Mutex<Vec<Vec<u8>>>,
    pub fail: AtomicBool,
}

impl MessageProducerStub {
    pub fn failing() -> Self {
        let stub = Self::default();
        stub.set_failing(true);
        stub
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn published_json<T: DeserializeOwned>(&self) -> Vec<T> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|p| serde_json::from_slice(p).unwrap())
            .collect()
    }
}

#[async_trait]
impl MessageProducer for MessageProducerStub {
    async fn publish(&self, payload: &[u8]) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::InfrastructureFailure, "Broker Down"));
        }
        self.published.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

// --- Consumer ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Ack,
    Nack { requeue: bool },
}

type SettlementLog = Arc<Mutex<Vec<(Vec<u8>, Settlement)>>>;
type Queue = mpsc::UnboundedSender<AppResult<Box<dyn Delivery>>>;

struct StubDelivery {
    payload: Vec<u8>,
    count: u32,
    log: SettlementLog,
    redeliver_to: Option<Queue>,
}

#[async_trait]
impl Delivery for StubDelivery {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn redelivery_count(&self) -> u32 {
        self.count
    }

    async fn ack(&self) -> AppResult<()> {
        self.log.lock().unwrap().push((self.payload.clone(), Settlement::Ack));
        Ok(())
    }

    async fn nack(&self, requeue: bool) -> AppResult<()> {
        self.log
            .lock()
            .unwrap()
            .push((self.payload.clone(), Settlement::Nack { requeue }));

        if let (true, Some(queue)) = (requeue, &self.redeliver_to) {
            let again = StubDelivery {
                payload: self.payload.clone(),
                count: self.count + 1,
                log: Arc::clone(&self.log),
                redeliver_to: Some(queue.clone()),
            };
            let _ = queue.unbounded_send(Ok(Box::new(again)));
        }
        Ok(())
    }
}

/// File en mémoire branchée sur un vrai `WorkerPool`.
pub struct InMemoryMessageConsumer {
    sender: Queue,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<AppResult<Box<dyn Delivery>>>>>,
    settlements: SettlementLog,
    pool: WorkerPool,
    shutdown: CancellationToken,
    redeliver: bool,
}

impl InMemoryMessageConsumer {
    pub fn new(pool: WorkerPool) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
            settlements: Arc::new(Mutex::new(Vec::new())),
            pool,
            shutdown: CancellationToken::new(),
            redeliver: false,
        }
    }

    /// Les messages nack(requeue) reviennent dans la file, compteur incrémenté
    /// comme le `x-delivery-count` d'une quorum queue.
    pub fn with_redelivery(mut self) -> Self {
        self.redeliver = true;
        self
    }

    pub fn push(&self, payload: Vec<u8>) {
        self.push_with_count(payload, 0);
    }

    pub fn push_with_count(&self, payload: Vec<u8>, count: u32) {
        let delivery = StubDelivery {
            payload,
            count,
            log: Arc::clone(&self.settlements),
            redeliver_to: self.redeliver.then(|| self.sender.clone()),
        };
        let _ = self.sender.unbounded_send(Ok(Box::new(delivery)));
    }

    /// Simule une coupure du broker.
    pub fn fail_stream(&self, error: AppError) {
        let _ = self.sender.unbounded_send(Err(error));
    }

    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn settlements(&self) -> Vec<(Vec<u8>, Settlement)> {
        self.settlements.lock().unwrap().clone()
    }

    pub async fn wait_for_settlements(&self, n: usize) {
        loop {
            let settled = self.settlements.lock().unwrap().len();
            if settled >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl MessageConsumer for InMemoryMessageConsumer {
    async fn consume(&self, handler: MessageHandler) -> AppResult<()> {
        let receiver = self.receiver.lock().unwrap().take().ok_or_else(|| {
            AppError::new(ErrorCode::InternalError, "Consumer already started")
        })?;

        self.pool
            .run(receiver.boxed(), handler, self.shutdown.clone())
            .await
    }
}
