/// Prior-turn results — the outcome of a system prompt issued on an earlier
/// turn (permission request, confirmation, sign-in, surface transfer, media
/// playback, reprompt). Present on a turn only when that turn is itself the
/// platform's answer to such a prompt.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriorResult {
    /// User answered a permission prompt.
    Permission { granted: bool },
    /// User answered a yes/no confirmation.
    Confirmation { confirmed: bool },
    /// Account-linking / sign-in outcome.
    SignIn { status: SignInStatus },
    /// User accepted or declined a move to another surface.
    NewSurface { status: SurfaceTransferStatus },
    /// Media playback status notification.
    MediaStatus { status: MediaPlaybackStatus },
    /// User supplied a date/time through the date-time prompt.
    DateTime { value: DateTime<Utc> },
    /// User supplied a location through the place prompt.
    Place {
        name: String,
        address: Option<String>,
    },
    /// The platform reprompted after silence.
    Reprompt { count: u32, is_final: bool },
    /// User picked an item from a previously offered list or carousel.
    OptionSelected { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignInStatus {
    Ok,
    Cancelled,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SurfaceTransferStatus {
    Ok,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaPlaybackStatus {
    Finished,
    Paused,
    Stopped,
    Failed,
}
