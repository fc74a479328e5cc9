//! A message queue on top of the in-memory bus.
//!
//! Sending and applying are decoupled in time: messages pile up in the
//! queue until someone delivers them to a basket.

use workshop_core::DomainResult;
use workshop_events::{EventBus, InMemoryBusError, InMemoryEventBus, Subscription};

use crate::basket::{BasketOutcome, ProductBasket};
use crate::message::BasketMessage;

#[derive(Debug)]
pub struct MessageQueue {
    bus: InMemoryEventBus<BasketMessage>,
    inbox: Subscription<BasketMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        let bus = InMemoryEventBus::new();
        let inbox = bus.subscribe();
        Self { bus, inbox }
    }

    pub fn send(&self, message: BasketMessage) -> Result<(), InMemoryBusError> {
        tracing::info!(message = %message, "message enqueued");
        self.bus.publish(message)
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<BasketMessage> {
        self.inbox.drain().collect()
    }

    /// Apply every queued message to `basket`, in the order they were sent.
    pub fn deliver_to(&self, basket: &mut ProductBasket) -> Vec<DomainResult<BasketOutcome>> {
        self.inbox.drain().map(|message| basket.apply(&message)).collect()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_happens_until_delivery() {
        let queue = MessageQueue::new();
        let mut basket = ProductBasket::new();

        queue.send(BasketMessage::add("candles", 5.0)).unwrap();
        queue.send(BasketMessage::add("pencils", 1.0)).unwrap();
        queue.send(BasketMessage::remove("candles", 2.0)).unwrap();
        assert!(basket.product_totals().is_empty());

        let outcomes = queue.deliver_to(&mut basket);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(Result::is_ok));
        assert_eq!(basket.quantity_of("candles"), 3.0);
        assert_eq!(basket.quantity_of("pencils"), 1.0);
    }

    #[test]
    fn drain_empties_the_queue_in_order() {
        let queue = MessageQueue::new();
        queue.send(BasketMessage::add("a", 1.0)).unwrap();
        queue.send(BasketMessage::add("b", 1.0)).unwrap();

        assert_eq!(
            queue.drain(),
            vec![BasketMessage::add("a", 1.0), BasketMessage::add("b", 1.0)]
        );
        assert!(queue.drain().is_empty());
    }
}
