pub mod router;

pub use router::{IntentHandler, IntentRouter};
