//! Notification Signals
//!
//! Minimal observer plumbing between the dispatcher and its collaborators.
//! A `Signal<T>` fans a value out to every connected receiver; receivers
//! drain with `try_recv` at the dispatcher's safe points, so emitting never
//! blocks and never re-enters the subscriber.

use std::sync::mpsc::{channel, Receiver, Sender};

/// A multi-subscriber notification source.
///
/// Subscribers that dropped their receiver are forgotten on the next
/// `emit`.
pub struct Signal<T: Clone> {
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> Signal<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Connect a new subscriber and return its receiving end.
    pub fn connect(&mut self) -> Receiver<T> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send `value` to every live subscriber.
    pub fn emit(&mut self, value: T) {
        self.subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
    }

    /// Number of live subscribers as of the last `emit`.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}
