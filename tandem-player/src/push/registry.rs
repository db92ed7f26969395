//! Subscriber registry
//!
//! The set of connected push peers. The registry holds only each peer's
//! outbound queue; the transport itself is owned by the adapter that
//! drains that queue.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tandem_common::AudioState;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Identity of one push peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered peer's end of its outbound queue
///
/// `initial` is the state as of the moment the peer joined; the queue only
/// ever carries snapshots committed after it. `recv()` yields `None` once
/// the registry has detached the peer; the owner must then close its
/// transport.
pub struct Subscription {
    pub id: SubscriberId,
    pub initial: AudioState,
    pub receiver: mpsc::Receiver<AudioState>,
}

struct Subscriber {
    tx: mpsc::Sender<AudioState>,
    /// Sequence number `initial` corresponds to
    joined_at: u64,
}

/// Set of push-capable subscriber handles
///
/// A std Mutex is enough: nothing awaits while it is held, and
/// `try_send` never blocks.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<SubscriberId, Subscriber>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, Subscriber>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a new peer whose queue buffers up to `capacity` snapshots.
    ///
    /// `initial` must be the state committed as snapshot `seq`; the peer is
    /// only offered snapshots with a later sequence number.
    pub fn attach(&self, capacity: usize, initial: AudioState, seq: u64) -> Subscription {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let id = SubscriberId::new();
        let mut subscribers = self.lock();
        subscribers.insert(id, Subscriber { tx, joined_at: seq });
        debug!("Subscriber {} attached at #{}, total subscribers: {}", id, seq, subscribers.len());
        Subscription {
            id,
            initial,
            receiver: rx,
        }
    }

    /// Remove a peer. Returns false if it was already gone.
    pub fn detach(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.lock();
        let removed = subscribers.remove(&id).is_some();
        if removed {
            debug!("Subscriber {} detached, total subscribers: {}", id, subscribers.len());
        }
        removed
    }

    /// Offer snapshot `seq` to every peer that joined before it.
    ///
    /// A peer whose queue is full or closed is evicted on the spot; dropping
    /// its sender ends its queue, which closes the transport. Returns the
    /// number of peers the snapshot was delivered to.
    pub fn for_each(&self, seq: u64, snapshot: AudioState) -> usize {
        let mut subscribers = self.lock();
        let mut delivered = 0;
        subscribers.retain(|id, subscriber| {
            if seq <= subscriber.joined_at {
                // Already covered by the peer's initial state
                return true;
            }
            match subscriber.tx.try_send(snapshot) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    warn!("Subscriber {} is not keeping up, detaching", id);
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    warn!("Subscriber {} went away, detaching", id);
                    false
                }
            }
        });
        delivered
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
