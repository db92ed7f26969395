//! The shared audio state record
//!
//! One `AudioState` exists per server process. Every client observes the
//! same record; it is sent to push subscribers as a bare JSON object with
//! camelCase keys (no envelope).

use serde::{Deserialize, Serialize};

use crate::human_time::format_clock;

/// Volume applied at startup and restored when unmuting
pub const DEFAULT_VOLUME: f64 = 0.7;

/// Track length used when none is configured (3 minutes)
pub const DEFAULT_DURATION_SECS: u32 = 180;

/// Snapshot of the virtual player
///
/// `Copy` so a snapshot can be taken under the store lock and handed to the
/// broadcaster without sharing anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioState {
    /// Whether the virtual playback clock is advancing
    pub is_playing: bool,

    /// Output level (0.0-1.0)
    pub volume: f64,

    /// Mute flag, independent of `volume` outside of the mute/volume commands
    pub is_muted: bool,

    /// Playback position in whole seconds (0..=duration)
    pub current_time: u32,

    /// Track length in whole seconds, fixed for the lifetime of the process
    pub duration: u32,
}

impl AudioState {
    /// Startup state for a track of `duration` seconds
    pub fn new(duration: u32) -> Self {
        Self {
            is_playing: false,
            volume: DEFAULT_VOLUME,
            is_muted: false,
            current_time: 0,
            duration,
        }
    }

    /// True once the position has reached the end of the track
    pub fn is_at_end(&self) -> bool {
        self.current_time >= self.duration
    }

    /// `MM:SS / MM:SS` rendering used in log lines
    pub fn progress_label(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.current_time),
            format_clock(self.duration)
        )
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}
