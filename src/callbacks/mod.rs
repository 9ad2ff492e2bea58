//! Step callbacks shared between wizards.
//!
//! Each factory takes a lens into the caller's container, so the same step
//! logic edits a standalone simulation's policy or the reform policy inside a
//! report. Every callback runs get, mutate, set, apply and then navigates; a
//! failed mutation leaves the container untouched and does not navigate.

pub mod error;
pub mod policy;
pub mod population;
pub mod report;
pub mod simulation;

pub use error::CallbackError;
pub use policy::{create_policy_callbacks, PolicyCallbacks};
pub use population::{create_population_callbacks, PopulationCallbacks};
pub use report::{create_report_callbacks, ReportCallbacks, ReportModes};
pub use simulation::{create_simulation_callbacks, SimulationCallbacks};

use crate::lens::Lens;
use std::sync::Arc;

/// Moves a wizard to another step.
pub trait Navigator<M> {
    fn navigate_to(&mut self, mode: M);
}

/// Runs in place of the default navigation once a step completes.
pub type CompletionHook<C> = Arc<dyn Fn(&C) + Send + Sync>;

pub(crate) struct Completion<C, M> {
    mode: M,
    hook: Option<CompletionHook<C>>,
}

impl<C, M: Clone> Completion<C, M> {
    pub(crate) fn new(mode: M, hook: Option<CompletionHook<C>>) -> Self {
        Self { mode, hook }
    }

    pub(crate) fn finish(&self, container: &C, navigator: &mut dyn Navigator<M>) {
        match &self.hook {
            Some(hook) => hook(container),
            None => navigator.navigate_to(self.mode.clone()),
        }
    }
}

impl<C, M: Clone> Clone for Completion<C, M> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode.clone(),
            hook: self.hook.clone(),
        }
    }
}

/// Get, mutate and set through `lens`, then apply to `container`.
pub(crate) fn commit<C, P>(
    container: &mut C,
    lens: &Lens<C, P>,
    mutate: impl FnOnce(P) -> Result<P, CallbackError>,
) -> Result<(), CallbackError> {
    let next = lens.try_modify(container, mutate)?;
    *container = next;
    Ok(())
}

pub(crate) fn non_empty_label(field: &'static str, label: &str) -> Result<String, CallbackError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(CallbackError::EmptyLabel { field });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_empty_id(what: &'static str, id: &str) -> Result<String, CallbackError> {
    if id.trim().is_empty() {
        return Err(CallbackError::MissingId { what });
    }
    Ok(id.to_string())
}
