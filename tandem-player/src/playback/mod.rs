//! Playback core: command processor, player service and tick source

pub mod processor;
pub mod service;
pub mod ticker;

pub use service::PlayerService;
pub use ticker::TickSource;
