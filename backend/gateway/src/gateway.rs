/// Turn processing — the thin caller that composes router and session.
///
/// One `Gateway` serves a deployment; each request gets its own
/// `TurnContext`, so a failing turn cannot corrupt another user's in-flight
/// turn, and nothing here panics across the boundary.
use tracing::{error, warn};
use uuid::Uuid;
use voxhook_core::{ResponseFragment, VoxError};
use voxhook_routing::IntentRouter;
use voxhook_session::{TurnContext, UserStorage};

use crate::config::GatewayConfig;
use crate::request::{TurnRequest, TurnResponse};

pub struct Gateway {
    router: IntentRouter,
    config: GatewayConfig,
}

impl Gateway {
    /// The router is registered up-front by the caller; registration errors
    /// (duplicate intents) abort startup before a gateway ever exists.
    pub fn new(router: IntentRouter, config: GatewayConfig) -> Self {
        Self { router, config }
    }

    /// Process one turn. Never fails outward: dispatch errors become the
    /// fallback response with the conversation kept open, state-contract
    /// violations abort the turn with the failure response.
    ///
    /// On any error path the inbound user storage is passed through
    /// untouched — partial handler writes are never committed.
    pub async fn handle(&self, request: TurnRequest) -> TurnResponse {
        let TurnRequest {
            request_id,
            intent,
            sub_option,
            parameters,
            capabilities,
            prior,
            user_storage,
        } = request;

        let mut ctx = TurnContext::create(
            intent.clone(),
            parameters,
            capabilities,
            prior,
            user_storage.clone(),
        );

        let dispatched = self
            .router
            .dispatch(&intent, sub_option.as_deref(), &mut ctx)
            .await;

        match dispatched {
            Ok(()) => match ctx.finish() {
                Ok(outcome) => TurnResponse::from_outcome(request_id, outcome),
                Err(err) => {
                    error!("[Gateway] Turn {request_id} violated the turn contract: {err}");
                    self.failure_response(request_id, user_storage)
                }
            },
            // A handler that trips the turn contract itself (double close,
            // keep-open after close) propagates through the router wrapped in
            // `Handler`; unwrap that so it lands in the fatal branch below,
            // not the recoverable one.
            Err(VoxError::Handler(inner))
                if matches!(
                    inner.downcast_ref::<VoxError>(),
                    Some(VoxError::InvalidTurnState(_))
                ) =>
            {
                error!("[Gateway] Turn {request_id} violated the turn contract: {inner}");
                self.failure_response(request_id, user_storage)
            }
            Err(
                err @ (VoxError::UnregisteredIntent(_)
                | VoxError::UnknownOption { .. }
                | VoxError::Handler(_)),
            ) => {
                warn!("[Gateway] Turn {request_id} fell back: {err}");
                self.fallback_response(request_id, user_storage)
            }
            Err(err) => {
                error!("[Gateway] Turn {request_id} aborted: {err}");
                self.failure_response(request_id, user_storage)
            }
        }
    }

    fn fallback_response(&self, request_id: Uuid, user_storage: UserStorage) -> TurnResponse {
        TurnResponse {
            request_id,
            fragments: vec![ResponseFragment::text(&self.config.fallback_text)],
            user_storage,
            is_closed: false,
        }
    }

    fn failure_response(&self, request_id: Uuid, user_storage: UserStorage) -> TurnResponse {
        TurnResponse {
            request_id,
            fragments: vec![ResponseFragment::text(&self.config.failure_text)],
            user_storage,
            is_closed: true,
        }
    }
}
