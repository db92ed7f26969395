//! # Tandem Player Library (tandem-player)
//!
//! One shared virtual audio player, many viewers.
//!
//! **Purpose:** Hold the authoritative `AudioState`, apply commands from
//! HTTP and WebSocket clients, advance a simulated playback clock, and fan
//! every resulting snapshot out to all connected push subscribers.
//!
//! **Data flow:** adapters → command processor → state store →
//! broadcaster → subscriber registry → adapter push-out. The tick source
//! feeds the same path.

pub mod api;
pub mod error;
pub mod playback;
pub mod push;
pub mod state;

pub use error::{Error, Result};
pub use playback::PlayerService;
pub use state::StateStore;
