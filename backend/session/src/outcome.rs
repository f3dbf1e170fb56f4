/// What a finished turn hands back to the caller.
use serde::Serialize;
use voxhook_core::ResponseFragment;

use crate::storage::UserStorage;

/// The caller serializes `fragments` into the outbound webhook response and
/// persists `user_storage` for the next conversation with this user.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub fragments: Vec<ResponseFragment>,
    pub user_storage: UserStorage,
    pub is_closed: bool,
}
