//! Notification events.
//!
//! The tracker publishes a [`TrackerEvent`] for outcomes the presentation
//! layer surfaces as toasts: a new high score, a deletion, a completed
//! import. Events travel over bounded crossbeam channels; delivery is
//! best-effort and never blocks or fails the mutation that produced it.

use std::sync::Mutex;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::debug;

use crate::types::RecordId;

/// A notification published by the tracker after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// A newly created record's score beat the previous best.
    ///
    /// Only fired when a previous best above zero existed: the very first
    /// record, or one added to an all-zero history, is not a "new high".
    HighScore {
        /// The new record's score.
        score: f64,
        /// The best score among the records that existed before the create.
        previous_best: f64,
    },

    /// A record was deleted.
    RecordDeleted {
        /// Id of the removed record.
        id: RecordId,
    },

    /// The collection was replaced by an import.
    DataImported {
        /// Number of records in the imported collection.
        count: usize,
    },
}

/// Fan-out hub for tracker events.
///
/// Each subscriber gets its own bounded channel. Publishing uses `try_send`:
/// a full channel drops that event for that subscriber, a disconnected one
/// is pruned.
pub(crate) struct EventHub {
    subscribers: Mutex<Vec<Sender<TrackerEvent>>>,
    capacity: usize,
}

impl EventHub {
    /// Creates a hub whose subscriber channels hold `capacity` events.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub(crate) fn subscribe(&self) -> Receiver<TrackerEvent> {
        let (tx, rx) = bounded(self.capacity);
        self.lock().push(tx);
        rx
    }

    /// Publishes an event to all live subscribers.
    pub(crate) fn publish(&self, event: TrackerEvent) {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            // Slow subscribers miss events rather than blocking the caller.
            Err(TrySendError::Full(_)) => {
                debug!(?event, "Subscriber channel full, dropping event");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<TrackerEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
