pub mod outcome;
pub mod storage;
pub mod turn;

pub use outcome::TurnOutcome;
pub use storage::UserStorage;
pub use turn::TurnContext;
