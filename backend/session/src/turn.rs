/// Turn context — everything a handler sees for one request/response cycle.
///
/// A context is created fresh per inbound request and consumed when the turn
/// finishes. Turn storage starts empty every time and is dropped with the
/// context, so nothing written during one turn can leak into the next, for
/// this user or any other.
use std::collections::HashMap;

use tracing::debug;
use voxhook_core::{PriorResult, ResponseFragment, SurfaceCapabilities, Value, VoxError};

use crate::outcome::TurnOutcome;
use crate::storage::UserStorage;

/// Whether the turn leaves the conversation open. Decided at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Undecided,
    KeepOpen,
    Close,
}

pub struct TurnContext {
    intent: String,
    parameters: HashMap<String, Value>,
    capabilities: SurfaceCapabilities,
    prior: Option<PriorResult>,
    /// Ephemeral turn storage, `conv.data` in the source samples.
    data: HashMap<String, Value>,
    user: UserStorage,
    fragments: Vec<ResponseFragment>,
    continuation: Continuation,
}

impl TurnContext {
    /// Build the context for one inbound request. The caller keeps the
    /// authoritative copy of user storage; what it passes in here is the
    /// loaded snapshot, and what it gets back from [`TurnContext::finish`]
    /// is what it should persist.
    pub fn create(
        intent: impl Into<String>,
        parameters: HashMap<String, Value>,
        capabilities: SurfaceCapabilities,
        prior: Option<PriorResult>,
        user: UserStorage,
    ) -> Self {
        let intent = intent.into();
        debug!("[Session] New turn for intent {intent}");
        Self {
            intent,
            parameters,
            capabilities,
            prior,
            data: HashMap::new(),
            user,
            fragments: Vec::new(),
            continuation: Continuation::Undecided,
        }
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    /// A recognized parameter from the NLU layer, if present.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    pub fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    pub fn prior(&self) -> Option<&PriorResult> {
        self.prior.as_ref()
    }

    /// Record the sub-option the user picked so the handler sees it as a
    /// prior result. The router calls this during dispatch; an explicit prior
    /// result from the request wins over it.
    pub fn set_selected_option(&mut self, key: impl Into<String>) {
        if self.prior.is_none() {
            self.prior = Some(PriorResult::OptionSelected { key: key.into() });
        }
    }

    /// Read a turn-scoped value written earlier in this same turn.
    pub fn data_get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Write a turn-scoped value. Gone when the turn ends.
    pub fn data_set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn user(&self) -> &UserStorage {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserStorage {
        &mut self.user
    }

    /// Append one response fragment. Fragments keep their append order and
    /// may still be appended after the conversation was marked closed.
    pub fn append(&mut self, fragment: ResponseFragment) {
        self.fragments.push(fragment);
    }

    /// Convenience for the most common fragment: plain spoken text.
    pub fn say(&mut self, speech: impl Into<String>) {
        self.append(ResponseFragment::text(speech));
    }

    /// Mark this as the final turn of the conversation.
    pub fn close_conversation(&mut self) -> Result<(), VoxError> {
        match self.continuation {
            Continuation::Undecided => {
                self.continuation = Continuation::Close;
                Ok(())
            }
            Continuation::Close => Err(VoxError::InvalidTurnState(
                "close_conversation called twice",
            )),
            Continuation::KeepOpen => Err(VoxError::InvalidTurnState(
                "close_conversation after keep_open",
            )),
        }
    }

    /// Explicitly keep the conversation open after this turn.
    pub fn keep_open(&mut self) -> Result<(), VoxError> {
        match self.continuation {
            Continuation::Undecided => {
                self.continuation = Continuation::KeepOpen;
                Ok(())
            }
            Continuation::KeepOpen => {
                Err(VoxError::InvalidTurnState("keep_open called twice"))
            }
            Continuation::Close => Err(VoxError::InvalidTurnState(
                "keep_open after close_conversation",
            )),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.continuation == Continuation::Close
    }

    /// End the turn: hand the fragments and the (possibly mutated) user
    /// storage back to the caller. Turn storage is dropped here.
    ///
    /// A turn that neither closed the conversation nor produced any output
    /// is a contract violation; the platform would have nothing to say.
    pub fn finish(self) -> Result<TurnOutcome, VoxError> {
        if self.fragments.is_empty() && self.continuation != Continuation::Close {
            return Err(VoxError::InvalidTurnState(
                "turn ended with no fragments and the conversation still open",
            ));
        }
        debug!(
            "[Session] Turn for intent {} finished with {} fragment(s)",
            self.intent,
            self.fragments.len()
        );
        Ok(TurnOutcome {
            fragments: self.fragments,
            user_storage: self.user,
            is_closed: self.continuation == Continuation::Close,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn() -> TurnContext {
        TurnContext::create(
            "Test Intent",
            HashMap::new(),
            SurfaceCapabilities::default(),
            None,
            UserStorage::new(),
        )
    }

    #[test]
    fn turn_storage_starts_empty() {
        let mut ctx = turn();
        ctx.data_set("firstNum", 4.0);
        assert_eq!(ctx.data_get("firstNum").and_then(Value::as_num), Some(4.0));

        // A later turn sees none of it.
        let ctx = turn();
        assert!(ctx.data_get("firstNum").is_none());
    }

    #[test]
    fn user_storage_mutations_survive_finish() {
        let mut ctx = turn();
        ctx.user_mut().set("name", "Ada");
        ctx.say("saved");
        let outcome = ctx.finish().unwrap();
        assert_eq!(
            outcome.user_storage.get("name").and_then(Value::as_str),
            Some("Ada")
        );
    }

    #[test]
    fn append_after_close_is_permitted() {
        let mut ctx = turn();
        ctx.close_conversation().unwrap();
        ctx.say("goodbye");
        let outcome = ctx.finish().unwrap();
        assert!(outcome.is_closed);
        assert_eq!(outcome.fragments.len(), 1);
    }

    #[test]
    fn double_close_is_rejected() {
        let mut ctx = turn();
        ctx.close_conversation().unwrap();
        assert!(matches!(
            ctx.close_conversation(),
            Err(VoxError::InvalidTurnState(_))
        ));
    }

    #[test]
    fn close_after_keep_open_is_rejected() {
        let mut ctx = turn();
        ctx.keep_open().unwrap();
        assert!(matches!(
            ctx.close_conversation(),
            Err(VoxError::InvalidTurnState(_))
        ));
    }

    #[test]
    fn silent_open_turn_is_rejected_at_finish() {
        let ctx = turn();
        assert!(matches!(
            ctx.finish(),
            Err(VoxError::InvalidTurnState(_))
        ));
    }

    #[test]
    fn silent_closed_turn_is_fine() {
        let mut ctx = turn();
        ctx.close_conversation().unwrap();
        let outcome = ctx.finish().unwrap();
        assert!(outcome.is_closed);
        assert!(outcome.fragments.is_empty());
    }

    #[test]
    fn explicit_prior_wins_over_selected_option() {
        let mut ctx = TurnContext::create(
            "List - OPTION",
            HashMap::new(),
            SurfaceCapabilities::default(),
            Some(PriorResult::Confirmation { confirmed: true }),
            UserStorage::new(),
        );
        ctx.set_selected_option("SELECTION_KEY_ONE");
        assert_eq!(
            ctx.prior(),
            Some(&PriorResult::Confirmation { confirmed: true })
        );
    }
}
