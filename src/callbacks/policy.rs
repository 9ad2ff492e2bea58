use super::{commit, non_empty_id, non_empty_label, CallbackError, Completion, CompletionHook, Navigator};
use crate::ingredients::{ParameterChange, PolicyState, UserPolicy};
use crate::lens::Lens;

pub struct PolicyCallbacks<C, M> {
    lens: Lens<C, PolicyState>,
    completion: Completion<C, M>,
}

/// Policy step callbacks focused by `lens`. Completing callbacks navigate to
/// `return_mode` unless `on_complete` is given.
pub fn create_policy_callbacks<C, M: Clone>(
    lens: Lens<C, PolicyState>,
    return_mode: M,
    on_complete: Option<CompletionHook<C>>,
) -> PolicyCallbacks<C, M> {
    PolicyCallbacks {
        lens,
        completion: Completion::new(return_mode, on_complete),
    }
}

impl<C, M: Clone> PolicyCallbacks<C, M> {
    pub fn update_label(&self, container: &mut C, label: &str) -> Result<(), CallbackError> {
        let label = non_empty_label("policy", label)?;
        commit(container, &self.lens, |policy| {
            Ok(PolicyState {
                label: Some(label),
                ..policy
            })
        })
    }

    /// Upserts `changes`, keyed by parameter and start date.
    pub fn update_policy(
        &self,
        container: &mut C,
        changes: Vec<ParameterChange>,
    ) -> Result<(), CallbackError> {
        commit(container, &self.lens, |mut policy| {
            for change in changes {
                non_empty_id("parameter", &change.parameter)?;
                match policy.parameters.iter_mut().find(|existing| {
                    existing.parameter == change.parameter && existing.start_date == change.start_date
                }) {
                    Some(existing) => *existing = change,
                    None => policy.parameters.push(change),
                }
            }
            Ok(policy)
        })
    }

    pub fn handle_select_current_law(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        current_law_id: &str,
        label: &str,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("current law policy", current_law_id)?;
        let label = non_empty_label("policy", label)?;
        commit(container, &self.lens, |_| {
            Ok(PolicyState {
                id: Some(id),
                label: Some(label),
                parameters: Vec::new(),
            })
        })?;
        tracing::debug!(policy_id = current_law_id, "current law selected");
        self.completion.finish(container, navigator);
        Ok(())
    }

    pub fn handle_select_existing(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        existing: &UserPolicy,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("policy", &existing.id)?;
        commit(container, &self.lens, |_| {
            Ok(PolicyState {
                id: Some(id),
                label: existing.label.clone(),
                parameters: existing.parameters.clone(),
            })
        })?;
        tracing::debug!(policy_id = %existing.id, "existing policy selected");
        self.completion.finish(container, navigator);
        Ok(())
    }

    pub fn handle_submit_success(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        policy_id: &str,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("policy", policy_id)?;
        commit(container, &self.lens, |policy| {
            Ok(PolicyState {
                id: Some(id),
                ..policy
            })
        })?;
        tracing::debug!(policy_id, "policy created");
        self.completion.finish(container, navigator);
        Ok(())
    }
}
