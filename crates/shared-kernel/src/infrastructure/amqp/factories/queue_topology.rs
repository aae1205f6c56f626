// crates/shared-kernel/src/infrastructure/amqp/factories/queue_topology.rs

use lapin::types::{AMQPValue, FieldTable, LongString, ShortString};

const QUEUE_TYPE: &str = "x-queue-type";
const DEAD_LETTER_EXCHANGE: &str = "x-dead-letter-exchange";
const DEAD_LETTER_ROUTING_KEY: &str = "x-dead-letter-routing-key";
const DEAD_LETTER_SUFFIX: &str = ".dlq";

/// Forme d'une file déclarée par le contexte AMQP.
///
/// Un plafond de re-livraisons n'a de sens que si le broker compte les
/// livraisons (`x-delivery-count`), ce que seules les quorum queues font,
/// et qu'un `nack(requeue = false)` part vers une file de rebut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueTopology {
    /// File classique durable, re-livraison illimitée.
    Classic,
    /// Quorum queue dont les rejets partent sur `<file>.dlq` via l'exchange par défaut.
    DeadLettered,
}

impl QueueTopology {
    pub fn for_ceiling(max_redeliveries: Option<u32>) -> Self {
        match max_redeliveries {
            Some(_) => Self::DeadLettered,
            None => Self::Classic,
        }
    }

    pub fn dead_letter_queue(queue: &str) -> String {
        format!("{queue}{DEAD_LETTER_SUFFIX}")
    }

    pub(crate) fn arguments(self, queue: &str) -> FieldTable {
        let mut table = FieldTable::default();
        if self == Self::DeadLettered {
            table.insert(ShortString::from(QUEUE_TYPE), long_string("quorum"));
            table.insert(ShortString::from(DEAD_LETTER_EXCHANGE), long_string(""));
            table.insert(
                ShortString::from(DEAD_LETTER_ROUTING_KEY),
                long_string(&Self::dead_letter_queue(queue)),
            );
        }
        table
    }
}

fn long_string(value: &str) -> AMQPValue {
    AMQPValue::LongString(LongString::from(value))
}
