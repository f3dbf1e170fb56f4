//! Gateway config defaults.

use serde::Deserialize;

/// Spoken when dispatch fails recoverably (unknown intent or option, handler
/// error) and the conversation stays open.
pub const DEFAULT_FALLBACK_TEXT: &str = "Sorry, I didn't understand that. Could you try again?";

/// Spoken when a turn hits a state-contract violation and gets aborted.
pub const DEFAULT_FAILURE_TEXT: &str = "Something went wrong on my end. Let's stop here.";

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
    #[serde(default = "default_failure_text")]
    pub failure_text: String,
}

fn default_fallback_text() -> String {
    DEFAULT_FALLBACK_TEXT.to_string()
}

fn default_failure_text() -> String {
    DEFAULT_FAILURE_TEXT.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            fallback_text: default_fallback_text(),
            failure_text: default_failure_text(),
        }
    }
}
