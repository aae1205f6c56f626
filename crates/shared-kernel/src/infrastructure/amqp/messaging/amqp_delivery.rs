// crates/shared-kernel/src/infrastructure/amqp/messaging/amqp_delivery.rs

use crate::application::ports::Delivery;
use crate::errors::AppResult;
use async_trait::async_trait;
use lapin::options::{BasicAckOptions, BasicNackOptions};
use lapin::types::{AMQPValue, FieldTable};

const DELIVERY_COUNT_HEADER: &str = "x-delivery-count";

pub struct AmqpDelivery {
    inner: lapin::message::Delivery,
}

impl AmqpDelivery {
    pub fn new(inner: lapin::message::Delivery) -> Self {
        Self { inner }
    }
}

/// Les quorum queues exposent `x-delivery-count`. Sur une file classique
/// seul le flag `redelivered` est connu et le compte plafonne à 1 : le
/// contexte déclare donc une quorum queue dès qu'un plafond est configuré.
fn delivery_count(headers: Option<&FieldTable>, redelivered: bool) -> u32 {
    let counted = headers.and_then(|table| {
        table
            .inner()
            .iter()
            .find(|(key, _)| key.as_str() == DELIVERY_COUNT_HEADER)
            .and_then(|(_, value)| match value {
                AMQPValue::LongLongInt(v) => u32::try_from(*v).ok(),
                AMQPValue::LongInt(v) => u32::try_from(*v).ok(),
                AMQPValue::LongUInt(v) => Some(*v),
                AMQPValue::ShortInt(v) => u32::try_from(*v).ok(),
                AMQPValue::ShortUInt(v) => Some(u32::from(*v)),
                AMQPValue::ShortShortInt(v) => u32::try_from(*v).ok(),
                AMQPValue::ShortShortUInt(v) => Some(u32::from(*v)),
                _ => None,
            })
    });

    counted.unwrap_or(u32::from(redelivered))
}

#[async_trait]
impl Delivery for AmqpDelivery {
    fn payload(&self) -> &[u8] {
        &self.inner.data
    }

    fn redelivery_count(&self) -> u32 {
        delivery_count(self.inner.properties.headers().as_ref(), self.inner.redelivered)
    }

    async fn ack(&self) -> AppResult<()> {
        self.inner.acker.ack(BasicAckOptions::default()).await?;
        Ok(())
    }

    async fn nack(&self, requeue: bool) -> AppResult<()> {
        let options = BasicNackOptions {
            multiple: false,
            requeue,
        };
        self.inner.acker.nack(options).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapin::types::ShortString;

    #[test]
    fn test_delivery_count_reads_quorum_header() {
        let mut headers = FieldTable::default();
        headers.insert(ShortString::from(DELIVERY_COUNT_HEADER), AMQPValue::LongLongInt(4));

        assert_eq!(delivery_count(Some(&headers), true), 4);
    }

    #[test]
    fn test_delivery_count_falls_back_to_redelivered_flag() {
        assert_eq!(delivery_count(None, false), 0);
        assert_eq!(delivery_count(None, true), 1);
        assert_eq!(delivery_count(Some(&FieldTable::default()), true), 1);
    }
}
