//! Shared audio state store
//!
//! The single synchronization point protecting the `AudioState` record.
//! Readers get value copies; writers mutate under exclusive access and get
//! the post-mutation copy back. The store never publishes to subscribers.

use tandem_common::AudioState;
use tokio::sync::RwLock;

/// Holder of the one authoritative `AudioState`
///
/// Uses RwLock: snapshot reads (HTTP GETs, new subscribers) far outnumber
/// writes.
pub struct StateStore {
    state: RwLock<AudioState>,
}

impl StateStore {
    pub fn new(initial: AudioState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Value copy of the record at some serialization point
    pub async fn snapshot(&self) -> AudioState {
        *self.state.read().await
    }

    /// Run `f` with shared access. No writer can commit while `f` runs.
    pub async fn with_shared<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AudioState) -> R,
    {
        let guard = self.state.read().await;
        f(&guard)
    }

    /// Run `f` with exclusive access and return the resulting snapshot.
    ///
    /// `f` is synchronous, so it cannot await (I/O, subscriber sends, or the
    /// store itself) while the lock is held.
    pub async fn with_exclusive<F>(&self, f: F) -> AudioState
    where
        F: FnOnce(&mut AudioState),
    {
        let mut guard = self.state.write().await;
        f(&mut guard);
        *guard
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(AudioState::default())
    }
}
