/// Demo handlers.
///
/// Small reference implementations of the two storage tiers and the
/// capability checks, wired up by [`crate::demo_router`] and exercised by the
/// gateway tests.
use anyhow::Result;
use async_trait::async_trait;
use voxhook_core::{ResponseFragment, Value};
use voxhook_routing::IntentHandler;
use voxhook_session::TurnContext;

/// Greets the user by the name remembered in durable storage, if any.
pub struct GreetHandler;

#[async_trait]
impl IntentHandler for GreetHandler {
    async fn handle(&self, ctx: &mut TurnContext) -> Result<()> {
        let greeting = match ctx.user().get("name").and_then(Value::as_str) {
            Some(name) => format!("Hello, {name}"),
            None => "Hello, stranger".to_string(),
        };
        ctx.say(greeting);
        Ok(())
    }
}

/// Stores the recognized `name` parameter in durable storage and ends the
/// conversation.
pub struct RememberNameHandler;

#[async_trait]
impl IntentHandler for RememberNameHandler {
    async fn handle(&self, ctx: &mut TurnContext) -> Result<()> {
        match ctx.param("name").and_then(Value::as_str).map(String::from) {
            Some(name) => {
                ctx.say(format!("Alright {name}, I'll remember that. See you!"));
                ctx.user_mut().set("name", name);
                ctx.close_conversation()?;
            }
            None => {
                ctx.say("Sorry, what was your name again?");
            }
        }
        Ok(())
    }
}

/// Reads out which capabilities the requesting surface has.
pub struct CapabilityReportHandler;

#[async_trait]
impl IntentHandler for CapabilityReportHandler {
    async fn handle(&self, ctx: &mut TurnContext) -> Result<()> {
        let caps = ctx.capabilities();
        let report = format!(
            "Your current device {} the screen output capability, \
             {} the audio output capability, \
             {} the media playback capability, and \
             {} the web browser capability.",
            has_or_not(caps.screen()),
            has_or_not(caps.audio()),
            has_or_not(caps.media_playback()),
            has_or_not(caps.web_browser()),
        );
        ctx.say(report);
        ctx.append(ResponseFragment::suggestions(["Greet", "Remember Name"]));
        Ok(())
    }
}

fn has_or_not(has: bool) -> &'static str {
    if has {
        "has"
    } else {
        "does not have"
    }
}
