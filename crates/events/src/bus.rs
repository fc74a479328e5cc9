//! Publish/subscribe abstraction (mechanics only).
//!
//! A bus is how a message outlives the moment it was created: the sender
//! publishes, and whoever subscribed picks it up whenever it is ready. That is
//! temporal decoupling, the sender and the handler never need to be available
//! at the same time.
//!
//! - **Transport-agnostic**: in-memory channels today, anything later
//! - **At-least-once**: consumers must tolerate duplicates
//! - **No persistence**: the journal is the source of truth, not the bus

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a message stream.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics), in publication order.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// bus.publish(message)?;
///
/// // ... later ...
/// for message in subscription.drain() {
///     basket.apply(&message)?;
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything queued right now, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = M> + '_ {
        self.receiver.try_iter()
    }
}

/// Domain-agnostic pub/sub bus.
///
/// `publish()` can fail (poisoned lock, closed transport). Since the journal is
/// written first, republishing is always safe.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
