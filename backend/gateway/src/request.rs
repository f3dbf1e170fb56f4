/// Inbound and outbound envelopes.
///
/// An external transport/NLU layer decodes the platform's webhook body into a
/// `TurnRequest`; an external serializer turns the `TurnResponse` back into
/// the platform's response format. No wire bytes are parsed here.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voxhook_core::{PriorResult, ResponseFragment, SurfaceCapabilities, Value};
use voxhook_session::{TurnOutcome, UserStorage};

#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    #[serde(default = "Uuid::new_v4")]
    pub request_id: Uuid,
    /// Intent id chosen by the NLU layer.
    pub intent: String,
    /// Disambiguating key for list/carousel selections, when present.
    #[serde(default)]
    pub sub_option: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
    #[serde(default)]
    pub capabilities: SurfaceCapabilities,
    #[serde(default)]
    pub prior: Option<PriorResult>,
    /// The caller's loaded snapshot of this user's durable storage.
    #[serde(default)]
    pub user_storage: UserStorage,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub request_id: Uuid,
    pub fragments: Vec<ResponseFragment>,
    /// What the caller should persist for this user.
    pub user_storage: UserStorage,
    pub is_closed: bool,
}

impl TurnResponse {
    pub fn from_outcome(request_id: Uuid, outcome: TurnOutcome) -> Self {
        Self {
            request_id,
            fragments: outcome.fragments,
            user_storage: outcome.user_storage,
            is_closed: outcome.is_closed,
        }
    }
}
