pub mod error;
pub mod intent;
pub mod session;
pub mod state;

pub use error::NavError;
pub use intent::{reduce, NavIntent};
pub use session::{DispatchOutcome, FlowSession, FrameContext, IgnoredReason, ParentFlowContext};
pub use state::{NavigationSnapshot, NavigationState, StackEntry, StackEntrySnapshot};
