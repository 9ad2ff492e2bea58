pub mod catalog;
pub mod component;
pub mod error;
pub mod model;
pub mod target;

pub use catalog::FlowCatalog;
pub use component::ComponentKey;
pub use error::FlowDefinitionError;
pub use model::{Flow, Frame};
pub use target::{classify_target, RawTarget, TransitionTarget};
