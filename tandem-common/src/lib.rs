//! # Tandem Common Library
//!
//! Shared code for the Tandem player service and its clients:
//! - The `AudioState` record and its JSON shape
//! - Command set and wire decoding (control requests, push frames)
//! - Configuration loading
//! - Time formatting helpers

pub mod audio_state;
pub mod commands;
pub mod config;
pub mod error;
pub mod human_time;

pub use audio_state::AudioState;
pub use commands::{Command, ControlRequest, PushFrame};
pub use config::PlayerConfig;
pub use error::{Error, Result};
