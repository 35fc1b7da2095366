//! Publish/subscribe abstraction for delivering messages to rendering surfaces.
//!
//! The bus is transport-agnostic and keeps no history: a subscriber only sees
//! messages published after it subscribed.

use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a message stream.
///
/// Messages arrive in publish order. A subscription is meant to be consumed by
/// one thread.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// bus.publish(message)?;
/// for message in subscription.drain() {
///     render(&message);
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

    /// Take every message that is already waiting, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic message bus (broadcast semantics).
///
/// Each subscriber gets a copy of every message published after it subscribed.
/// Implementations must be safe to share across threads.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
