use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::core::MarkerSetFrame;

/// Fan-out queue between one or more producers and subscribed consumers.
///
/// Each [`FrameQueue::subscribe`] call returns a receiver that sees every item
/// pushed after it subscribed. With a capacity, a full subscriber blocks the
/// producer; without one, subscribers buffer without limit.
pub struct FrameQueue<T> {
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
    capacity: Option<usize>,
}

impl<T: Clone> FrameQueue<T> {
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    pub fn bounded(capacity: usize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
            capacity,
        }
    }

    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = match self.capacity {
            Some(cap) => bounded(cap),
            None => unbounded(),
        };
        self.lock().push(tx);
        rx
    }

    /// Deliver `item` to every live subscriber. Returns how many received it.
    pub fn push(&self, item: &T) -> usize {
        // Send outside the lock so a full bounded subscriber does not stall
        // concurrent subscribe() calls.
        let senders: Vec<Sender<T>> = self.lock().iter().cloned().collect();

        let mut delivered = 0;
        let mut disconnected = Vec::new();
        for tx in senders {
            if tx.send(item.clone()).is_ok() {
                delivered += 1;
            } else {
                disconnected.push(tx);
            }
        }

        if !disconnected.is_empty() {
            let mut subscribers = self.lock();
            let before = subscribers.len();
            subscribers.retain(|tx| !disconnected.iter().any(|dead| dead.same_channel(tx)));
            debug!(
                pruned = before - subscribers.len(),
                "Dropped disconnected queue subscribers"
            );
        }

        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Clone for FrameQueue<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
            capacity: self.capacity,
        }
    }
}

/// Queue carrying marker frames to downstream stages
pub type MarkerSetQueue = FrameQueue<MarkerSetFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_without_subscribers_is_dropped() {
        let queue: FrameQueue<u32> = FrameQueue::unbounded();
        assert_eq!(queue.push(&1), 0);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_items() {
        let queue: FrameQueue<u32> = FrameQueue::unbounded();
        let early = queue.subscribe();
        queue.push(&1);
        let late = queue.subscribe();
        queue.push(&2);

        assert_eq!(early.try_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(late.try_iter().collect::<Vec<_>>(), vec![2]);
    }
}
