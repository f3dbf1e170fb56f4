pub mod config;
pub mod gateway;
pub mod handlers;
pub mod request;
pub mod telemetry;

pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use handlers::{CapabilityReportHandler, GreetHandler, RememberNameHandler};
pub use request::{TurnRequest, TurnResponse};
pub use telemetry::init_logger;

use std::sync::Arc;

use voxhook_core::VoxError;
use voxhook_routing::IntentRouter;

/// Build a router pre-wired with the demo handlers.
pub fn demo_router() -> Result<IntentRouter, VoxError> {
    let mut router = IntentRouter::new();
    router.register("Greet", Arc::new(GreetHandler))?;
    router.register("Remember Name", Arc::new(RememberNameHandler))?;
    router.register("Current Capabilities", Arc::new(CapabilityReportHandler))?;
    Ok(router)
}
