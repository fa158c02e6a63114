//! Change bus for detection fan-out
//!
//! One bus per process, created at server construction and handed to ingest
//! and API state as an injected dependency. Signals carry no payload: a
//! wake-up means "state may have changed, re-fetch truth", never "here is
//! the change".

use tokio::sync::broadcast;

/// Payload-less change notification. Ephemeral; exists only in transit to
/// current subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignal;

/// Process-wide publish/subscribe fan-out for change signals.
///
/// Publishing never blocks and never fails: with no subscribers the signal
/// is dropped, and a slow subscriber only overruns its own bounded queue.
/// Signals published before a subscription began are not replayed.
#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeSignal>,
}

impl ChangeBus {
    /// Create a bus whose subscribers each buffer up to `capacity` pending
    /// signals before coalescing.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change signal to all current subscribers. Fire-and-forget.
    pub fn publish(&self) {
        // Ignore errors if no receivers
        let _ = self.sender.send(ChangeSignal);
    }

    /// Register a subscriber. Dropping the returned subscription
    /// unsubscribes.
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            rx: self.sender.subscribe(),
        }
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A live subscription to the change bus, scoped to its owner's lifetime.
pub struct ChangeSubscription {
    rx: broadcast::Receiver<ChangeSignal>,
}

impl ChangeSubscription {
    /// Wait for the next signal.
    ///
    /// Returns `None` only when the bus itself is gone (daemon shutdown).
    /// An overrun queue is reported as a normal wake-up: missed signals are
    /// indistinguishable from coalesced ones, and the subscriber re-fetches
    /// state either way.
    pub async fn changed(&mut self) -> Option<ChangeSignal> {
        match self.rx.recv().await {
            Ok(signal) => Some(signal),
            Err(broadcast::error::RecvError::Lagged(_)) => Some(ChangeSignal),
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}
