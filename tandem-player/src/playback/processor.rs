//! Command processor
//!
//! Pure state transitions. Nothing here locks, logs, or publishes; the
//! service applies these functions under the store's exclusive access.

use tandem_common::audio_state::DEFAULT_VOLUME;
use tandem_common::{AudioState, Command};

/// Next state after `command`
pub fn transition(mut state: AudioState, command: &Command) -> AudioState {
    match *command {
        Command::Play => state.is_playing = true,
        Command::Pause => state.is_playing = false,
        Command::TogglePlay => state.is_playing = !state.is_playing,
        Command::SetVolume(Some(volume)) if !volume.is_nan() => {
            // Clamp first so negative input mutes; `<=` also folds -0.0 into 0.0
            let volume = if volume <= 0.0 { 0.0 } else { volume.min(1.0) };
            state.volume = volume;
            state.is_muted = volume == 0.0;
        }
        Command::ToggleMute => {
            state.is_muted = !state.is_muted;
            state.volume = if state.is_muted { 0.0 } else { DEFAULT_VOLUME };
        }
        Command::Reset => {
            state.is_playing = false;
            state.current_time = 0;
        }
        Command::SetPosition(Some(position)) if !position.is_nan() => {
            state.current_time = position.floor().clamp(0.0, f64::from(state.duration)) as u32;
        }
        // Missing or non-numeric payload
        Command::SetVolume(_) | Command::SetPosition(_) => {}
    }
    state
}

/// Next state after one tick of the virtual playback clock
///
/// The tick that finds the position already at the end of the track stops
/// playback and rewinds. So with a 5 second track the positions observed
/// are 1..=5, then the reset state.
pub fn advance(mut state: AudioState) -> AudioState {
    if state.is_playing {
        if state.is_at_end() {
            state.is_playing = false;
            state.current_time = 0;
        } else {
            state.current_time += 1;
        }
    }
    state
}
