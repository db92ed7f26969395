//! Player service
//!
//! Composes the state store, the command processor and the broadcaster
//! hand-off. Both edge adapters and the tick source go through here; none
//! of them touches the store directly.

use std::sync::Arc;

use tandem_common::{AudioState, Command, PlayerConfig};
use tracing::{debug, info};

use super::processor::{advance, transition};
use crate::push::{Broadcaster, SubscriberId, SubscriberRegistry, Subscription};
use crate::state::StateStore;

/// The single authoritative player shared by every client
pub struct PlayerService {
    store: StateStore,
    registry: Arc<SubscriberRegistry>,
    broadcaster: Broadcaster,
    subscriber_queue: usize,
    heartbeat: bool,
}

impl PlayerService {
    /// Create the service and start its broadcaster.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &PlayerConfig) -> Self {
        let registry = Arc::new(SubscriberRegistry::new());
        let broadcaster = Broadcaster::spawn(Arc::clone(&registry));
        Self {
            store: StateStore::new(AudioState::new(config.duration_secs)),
            registry,
            broadcaster,
            subscriber_queue: config.subscriber_queue,
            heartbeat: config.heartbeat,
        }
    }

    pub async fn snapshot(&self) -> AudioState {
        self.store.snapshot().await
    }

    /// Apply an accepted command and broadcast the result exactly once.
    ///
    /// The snapshot enters the hand-off while the exclusive guard is still
    /// held. `publish` never suspends, and hand-off order then matches the
    /// order in which mutations were serialized at the store.
    pub async fn execute(&self, command: Command) -> AudioState {
        let broadcaster = &self.broadcaster;
        let state = self
            .store
            .with_exclusive(|state| {
                *state = transition(*state, &command);
                broadcaster.publish(*state);
            })
            .await;
        debug!("Command {} applied, position {}", command, state.progress_label());
        state
    }

    /// Apply `command` if it is known; unknown commands change nothing and
    /// are not broadcast.
    pub async fn dispatch(&self, command: Option<Command>) -> AudioState {
        match command {
            Some(command) => self.execute(command).await,
            None => self.snapshot().await,
        }
    }

    /// One step of the virtual playback clock.
    ///
    /// With heartbeats on, every tick is broadcast; otherwise only ticks
    /// that changed the state (which always includes the end-of-track reset).
    pub async fn tick(&self) -> AudioState {
        let heartbeat = self.heartbeat;
        let broadcaster = &self.broadcaster;
        let mut finished = false;
        let state = self
            .store
            .with_exclusive(|state| {
                let next = advance(*state);
                finished = state.is_playing && !next.is_playing;
                let changed = next != *state;
                *state = next;
                if heartbeat || changed {
                    broadcaster.publish(next);
                }
            })
            .await;
        if finished {
            info!("End of track reached, playback stopped and rewound");
        }
        state
    }

    /// Register a new push subscriber.
    ///
    /// The subscription's initial state and its place in the broadcast
    /// sequence are taken under the same guard, so the queue holds exactly
    /// the snapshots committed after `initial`.
    pub async fn subscribe(&self) -> Subscription {
        let registry = &self.registry;
        let broadcaster = &self.broadcaster;
        let capacity = self.subscriber_queue;
        self.store
            .with_shared(|state| registry.attach(capacity, *state, broadcaster.published()))
            .await
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.registry.detach(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Snapshots handed to the broadcaster since startup
    pub fn broadcasts(&self) -> u64 {
        self.broadcaster.published()
    }
}
