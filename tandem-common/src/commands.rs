//! Player commands and their wire encodings
//!
//! Two wire forms carry the same closed command set:
//! - `POST /api/control` bodies: `{"action": "...", "value": 0.5}`
//! - WebSocket push frames: `{"type": "...", "data": 0.5}`
//!
//! Both are decoded through [`Command::parse`] so the name → command mapping
//! exists exactly once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named state transition request
///
/// `SetVolume` and `SetPosition` carry `None` when the payload was missing or
/// not a number. Such commands are still accepted (and broadcast) but leave
/// the state untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    TogglePlay,
    SetVolume(Option<f64>),
    ToggleMute,
    Reset,
    SetPosition(Option<f64>),
}

impl Command {
    /// Map a wire name plus optional numeric payload to a command.
    ///
    /// Returns `None` for names outside the command set.
    pub fn parse(name: &str, value: Option<f64>) -> Option<Self> {
        let command = match name {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "togglePlay" => Command::TogglePlay,
            "setVolume" => Command::SetVolume(value),
            "toggleMute" => Command::ToggleMute,
            "reset" => Command::Reset,
            "setPosition" => Command::SetPosition(value),
            _ => return None,
        };
        Some(command)
    }

    /// Like [`Command::parse`], with an untyped JSON payload.
    ///
    /// Non-numeric payloads become `None`.
    pub fn from_wire(name: &str, payload: Option<&Value>) -> Option<Self> {
        Self::parse(name, payload.and_then(Value::as_f64))
    }

    /// Wire name of this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::TogglePlay => "togglePlay",
            Command::SetVolume(_) => "setVolume",
            Command::ToggleMute => "toggleMute",
            Command::Reset => "reset",
            Command::SetPosition(_) => "setPosition",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SetVolume(Some(v)) | Command::SetPosition(Some(v)) => {
                write!(f, "{}({})", self.name(), v)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// `POST /api/control` request body
///
/// `action` is required. `value` must be a JSON number when present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlRequest {
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl ControlRequest {
    /// Command named by this request, `None` if the action is unknown
    pub fn command(&self) -> Option<Command> {
        Command::parse(&self.action, self.value)
    }
}

/// Client-to-server WebSocket frame
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PushFrame {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PushFrame {
    /// Command named by this frame, `None` if the type is unknown
    pub fn command(&self) -> Option<Command> {
        Command::from_wire(&self.kind, self.data.as_ref())
    }
}
