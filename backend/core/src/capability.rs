/// Surface capabilities — what the requesting device can render.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single surface capability flag, using the platform wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "actions.capability.SCREEN_OUTPUT")]
    ScreenOutput,
    #[serde(rename = "actions.capability.AUDIO_OUTPUT")]
    AudioOutput,
    #[serde(rename = "actions.capability.MEDIA_RESPONSE_AUDIO")]
    MediaResponseAudio,
    #[serde(rename = "actions.capability.WEB_BROWSER")]
    WebBrowser,
    #[serde(rename = "actions.capability.INTERACTIVE_CANVAS")]
    InteractiveCanvas,
    /// Capability string this runtime does not know about.
    #[serde(other)]
    Unknown,
}

/// The capability set of the requesting surface. Read-only for handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceCapabilities {
    flags: HashSet<Capability>,
}

impl SurfaceCapabilities {
    pub fn new(flags: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.flags.contains(&capability)
    }

    /// Shorthand for the screen-output check nearly every visual handler does.
    pub fn screen(&self) -> bool {
        self.has(Capability::ScreenOutput)
    }

    pub fn audio(&self) -> bool {
        self.has(Capability::AudioOutput)
    }

    pub fn media_playback(&self) -> bool {
        self.has(Capability::MediaResponseAudio)
    }

    pub fn web_browser(&self) -> bool {
        self.has(Capability::WebBrowser)
    }
}
