//! Snapshot broadcaster for real-time client updates

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tandem_common::AudioState;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::registry::SubscriberRegistry;

/// Producer side of the ordered hand-off to the broadcast loop
///
/// The hand-off is unbounded so `publish` never suspends; mutators may call
/// it while holding the store lock without being stalled by slow peers.
/// Snapshots are numbered from 1 in publish order.
#[derive(Clone)]
pub struct Broadcaster {
    tx: mpsc::UnboundedSender<(u64, AudioState)>,
    published: Arc<AtomicU64>,
}

impl Broadcaster {
    /// Create the hand-off and spawn its single consumer task
    pub fn spawn(registry: Arc<SubscriberRegistry>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(rx, registry));
        info!("Broadcaster started");
        Self {
            tx,
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue a snapshot for delivery to every subscriber.
    ///
    /// Callers serialize publishes (the store's write guard), so sequence
    /// numbers follow commit order.
    pub fn publish(&self, snapshot: AudioState) {
        let seq = self.published.fetch_add(1, Ordering::AcqRel) + 1;
        // Only fails once the consumer task is gone (runtime shutdown)
        let _ = self.tx.send((seq, snapshot));
    }

    /// Sequence number of the most recent snapshot, 0 before the first
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}

/// Drain the hand-off in FIFO order, fanning each snapshot out
async fn run(
    mut rx: mpsc::UnboundedReceiver<(u64, AudioState)>,
    registry: Arc<SubscriberRegistry>,
) {
    while let Some((seq, snapshot)) = rx.recv().await {
        let delivered = registry.for_each(seq, snapshot);
        trace!("Broadcast snapshot #{} to {} subscribers", seq, delivered);
    }
    debug!("Broadcaster stopped");
}
