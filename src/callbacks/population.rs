use super::{commit, non_empty_id, non_empty_label, CallbackError, Completion, CompletionHook, Navigator};
use crate::ingredients::{PopulationScope, PopulationState, UserGeography, UserHousehold};
use crate::lens::Lens;

pub struct PopulationCallbacks<C, M> {
    lens: Lens<C, PopulationState>,
    label_mode: M,
    completion: Completion<C, M>,
}

/// Population step callbacks. Choosing a scope moves to `label_mode`; every
/// completing callback goes to `return_mode` unless `on_complete` is given.
pub fn create_population_callbacks<C, M: Clone>(
    lens: Lens<C, PopulationState>,
    label_mode: M,
    return_mode: M,
    on_complete: Option<CompletionHook<C>>,
) -> PopulationCallbacks<C, M> {
    PopulationCallbacks {
        lens,
        label_mode,
        completion: Completion::new(return_mode, on_complete),
    }
}

impl<C, M: Clone> PopulationCallbacks<C, M> {
    pub fn update_label(&self, container: &mut C, label: &str) -> Result<(), CallbackError> {
        let label = non_empty_label("population", label)?;
        commit(container, &self.lens, |population| {
            Ok(PopulationState {
                label: Some(label),
                ..population
            })
        })
    }

    /// Starts a new population with `scope`; any previously chosen household
    /// or geography is dropped.
    pub fn handle_scope_selected(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        scope: PopulationScope,
    ) -> Result<(), CallbackError> {
        commit(container, &self.lens, |population| {
            Ok(PopulationState {
                scope: Some(scope),
                household_id: None,
                geography_id: None,
                ..population
            })
        })?;
        navigator.navigate_to(self.label_mode.clone());
        Ok(())
    }

    pub fn handle_select_existing_household(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        household: &UserHousehold,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("household", &household.id)?;
        commit(container, &self.lens, |_| {
            Ok(PopulationState {
                label: household.label.clone(),
                scope: Some(PopulationScope::Household),
                household_id: Some(id),
                geography_id: None,
            })
        })?;
        tracing::debug!(household_id = %household.id, "existing household selected");
        self.completion.finish(container, navigator);
        Ok(())
    }

    pub fn handle_select_existing_geography(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        geography: &UserGeography,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("geography", &geography.geography_id)?;
        commit(container, &self.lens, |_| {
            Ok(PopulationState {
                label: geography.label.clone(),
                scope: Some(geography.scope()),
                household_id: None,
                geography_id: Some(id),
            })
        })?;
        tracing::debug!(geography_id = %geography.geography_id, "existing geography selected");
        self.completion.finish(container, navigator);
        Ok(())
    }

    pub fn handle_household_submit_success(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        household_id: &str,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("household", household_id)?;
        commit(container, &self.lens, |population| {
            Ok(PopulationState {
                scope: Some(PopulationScope::Household),
                household_id: Some(id),
                geography_id: None,
                ..population
            })
        })?;
        tracing::debug!(household_id, "household created");
        self.completion.finish(container, navigator);
        Ok(())
    }

    pub fn handle_geographic_submit_success(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        geography_id: &str,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("geography", geography_id)?;
        commit(container, &self.lens, |population| {
            let scope = match population.scope {
                Some(scope @ PopulationScope::Geography { .. }) => scope,
                _ => PopulationScope::Geography { region: None },
            };
            Ok(PopulationState {
                scope: Some(scope),
                household_id: None,
                geography_id: Some(id),
                ..population
            })
        })?;
        tracing::debug!(geography_id, "geographic population confirmed");
        self.completion.finish(container, navigator);
        Ok(())
    }
}
