/// Intent dispatch — route an inbound turn to its registered handler.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use voxhook_core::VoxError;
use voxhook_session::TurnContext;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// One conversational action. Handlers read the turn context, append
/// response fragments, and may suspend internally (e.g. while awaiting an
/// external service) — the router always awaits completion before the turn
/// finalizes, so fragment order within a turn is deterministic.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(&self, ctx: &mut TurnContext) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

struct Route {
    handler: Arc<dyn IntentHandler>,
    /// Closed set of selectable item keys for "- OPTION" follow-up intents.
    /// `None` means the intent takes no sub-option.
    valid_options: Option<HashSet<String>>,
}

/// Maps intent ids to handlers. Built once at process start, immutable during
/// serving; construct it explicitly and pass it to the request entry point
/// rather than keeping an ambient global.
#[derive(Default)]
pub struct IntentRouter {
    routes: HashMap<String, Route>,
}

impl IntentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an intent. Duplicate registration is a startup
    /// bug and aborts initialization.
    pub fn register(
        &mut self,
        intent: impl Into<String>,
        handler: Arc<dyn IntentHandler>,
    ) -> Result<(), VoxError> {
        self.insert(intent.into(), handler, None)
    }

    /// Register a handler together with the closed set of sub-option keys it
    /// accepts. A list- or carousel-rendering handler that offers N items
    /// must register those item keys here on its "- OPTION" follow-up intent,
    /// otherwise the router has nothing to validate selections against.
    pub fn register_with_options(
        &mut self,
        intent: impl Into<String>,
        handler: Arc<dyn IntentHandler>,
        valid_options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), VoxError> {
        let options = valid_options.into_iter().map(Into::into).collect();
        self.insert(intent.into(), handler, Some(options))
    }

    fn insert(
        &mut self,
        intent: String,
        handler: Arc<dyn IntentHandler>,
        valid_options: Option<HashSet<String>>,
    ) -> Result<(), VoxError> {
        if self.routes.contains_key(&intent) {
            return Err(VoxError::DuplicateIntent(intent));
        }
        debug!("[Router] Registered intent {intent}");
        self.routes.insert(
            intent,
            Route {
                handler,
                valid_options,
            },
        );
        Ok(())
    }

    pub fn is_registered(&self, intent: &str) -> bool {
        self.routes.contains_key(intent)
    }

    /// All registered intent ids, unordered.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Look up the handler for `intent` and run it to completion against
    /// `ctx`. The platform guarantees a sub-option came from a previously
    /// offered set, but we re-check it against the registered set anyway and
    /// refuse to invoke the handler on a mismatch.
    pub async fn dispatch(
        &self,
        intent: &str,
        sub_option: Option<&str>,
        ctx: &mut TurnContext,
    ) -> Result<(), VoxError> {
        let route = self
            .routes
            .get(intent)
            .ok_or_else(|| VoxError::UnregisteredIntent(intent.to_string()))?;

        if let (Some(option), Some(valid)) = (sub_option, &route.valid_options) {
            if !valid.contains(option) {
                warn!("[Router] Rejected option {option:?} for intent {intent}");
                return Err(VoxError::UnknownOption {
                    intent: intent.to_string(),
                    option: option.to_string(),
                });
            }
        }
        if let Some(option) = sub_option {
            ctx.set_selected_option(option);
        }

        info!("[Router] Dispatching intent {intent}");
        route.handler.handle(ctx).await.map_err(VoxError::Handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use voxhook_core::{PriorResult, SurfaceCapabilities};
    use voxhook_session::UserStorage;

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IntentHandler for CountingHandler {
        async fn handle(&self, ctx: &mut TurnContext) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ctx.say("handled");
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl IntentHandler for FailingHandler {
        async fn handle(&self, _ctx: &mut TurnContext) -> Result<()> {
            anyhow::bail!("order submission timed out")
        }
    }

    fn ctx() -> TurnContext {
        TurnContext::create(
            "any",
            Map::new(),
            SurfaceCapabilities::default(),
            None,
            UserStorage::new(),
        )
    }

    fn counting(router: &mut IntentRouter, intent: &str) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        router
            .register(intent, Arc::new(CountingHandler { calls: calls.clone() }))
            .unwrap();
        calls
    }

    #[tokio::test]
    async fn dispatch_invokes_exactly_one_handler_once() {
        let mut router = IntentRouter::new();
        let greet_calls = counting(&mut router, "Greet");
        let bye_calls = counting(&mut router, "Goodbye");

        router.dispatch("Greet", None, &mut ctx()).await.unwrap();
        assert_eq!(greet_calls.load(Ordering::SeqCst), 1);
        assert_eq!(bye_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unregistered_intent_invokes_nothing() {
        let mut router = IntentRouter::new();
        let calls = counting(&mut router, "Greet");

        let err = router.dispatch("Missing", None, &mut ctx()).await.unwrap_err();
        assert!(matches!(err, VoxError::UnregisteredIntent(ref i) if i == "Missing"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let mut router = IntentRouter::new();
        counting(&mut router, "Greet");
        let err = router
            .register("Greet", Arc::new(FailingHandler))
            .unwrap_err();
        assert!(matches!(err, VoxError::DuplicateIntent(ref i) if i == "Greet"));
    }

    #[tokio::test]
    async fn option_outside_declared_set_is_rejected() {
        let mut router = IntentRouter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        router
            .register_with_options(
                "List - OPTION",
                Arc::new(CountingHandler { calls: calls.clone() }),
                ["A", "B"],
            )
            .unwrap();

        let err = router
            .dispatch("List - OPTION", Some("C"), &mut ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, VoxError::UnknownOption { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        router
            .dispatch("List - OPTION", Some("A"), &mut ctx())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn selected_option_is_surfaced_to_the_handler() {
        struct EchoOption;

        #[async_trait]
        impl IntentHandler for EchoOption {
            async fn handle(&self, ctx: &mut TurnContext) -> Result<()> {
                match ctx.prior() {
                    Some(PriorResult::OptionSelected { key }) => {
                        let key = key.clone();
                        ctx.say(format!("You selected {key}"));
                    }
                    _ => ctx.say("No selection"),
                }
                Ok(())
            }
        }

        let mut router = IntentRouter::new();
        router
            .register_with_options("Carousel - OPTION", Arc::new(EchoOption), ["HOME", "PIXEL"])
            .unwrap();

        let mut context = ctx();
        router
            .dispatch("Carousel - OPTION", Some("HOME"), &mut context)
            .await
            .unwrap();
        let outcome = context.finish().unwrap();
        assert_eq!(
            outcome.fragments,
            vec![voxhook_core::ResponseFragment::text("You selected HOME")]
        );
    }

    #[tokio::test]
    async fn handler_failure_maps_to_dispatch_error() {
        let mut router = IntentRouter::new();
        router.register("Submit Order", Arc::new(FailingHandler)).unwrap();

        let err = router
            .dispatch("Submit Order", None, &mut ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, VoxError::Handler(_)));
    }

    #[tokio::test]
    async fn intent_without_declared_options_ignores_sub_option() {
        // Lenient for intents that never declared an option set; the strict
        // check only applies where the registration gave us a set to check.
        let mut router = IntentRouter::new();
        let calls = counting(&mut router, "Greet");
        router
            .dispatch("Greet", Some("whatever"), &mut ctx())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
