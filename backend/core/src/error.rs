use thiserror::Error;

/// Top-level error type for the voxhook runtime.
#[derive(Debug, Error)]
pub enum VoxError {
    /// Registration-time contract violation. Fatal at startup.
    #[error("intent already registered: {0}")]
    DuplicateIntent(String),

    /// No handler is registered for the requested intent.
    #[error("no handler registered for intent: {0}")]
    UnregisteredIntent(String),

    /// The supplied sub-option is not in the intent's declared option set.
    #[error("intent {intent} has no option {option:?}")]
    UnknownOption { intent: String, option: String },

    /// Turn lifecycle misuse (closing twice, keep-open after close, or
    /// finishing an open turn with no output).
    #[error("invalid turn state: {0}")]
    InvalidTurnState(&'static str),

    /// The handler itself failed while the router was awaiting it.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),
}
