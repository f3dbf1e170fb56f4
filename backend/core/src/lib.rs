pub mod capability;
pub mod error;
pub mod fragment;
pub mod prior;
pub mod value;

pub use capability::{Capability, SurfaceCapabilities};
pub use error::VoxError;
pub use fragment::ResponseFragment;
pub use prior::{MediaPlaybackStatus, PriorResult, SignInStatus, SurfaceTransferStatus};
pub use value::Value;
