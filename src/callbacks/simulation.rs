use super::{commit, non_empty_id, non_empty_label, CallbackError, Completion, CompletionHook, Navigator};
use crate::ingredients::SimulationState;
use crate::lens::Lens;

pub struct SimulationCallbacks<C, M> {
    lens: Lens<C, SimulationState>,
    completion: Completion<C, M>,
}

pub fn create_simulation_callbacks<C, M: Clone>(
    lens: Lens<C, SimulationState>,
    return_mode: M,
    on_complete: Option<CompletionHook<C>>,
) -> SimulationCallbacks<C, M> {
    SimulationCallbacks {
        lens,
        completion: Completion::new(return_mode, on_complete),
    }
}

impl<C, M: Clone> SimulationCallbacks<C, M> {
    pub fn update_label(&self, container: &mut C, label: &str) -> Result<(), CallbackError> {
        let label = non_empty_label("simulation", label)?;
        commit(container, &self.lens, |simulation| {
            Ok(SimulationState {
                label: Some(label),
                ..simulation
            })
        })
    }

    pub fn handle_submit_success(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        simulation_id: &str,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("simulation", simulation_id)?;
        commit(container, &self.lens, |simulation| {
            Ok(SimulationState {
                id: Some(id),
                ..simulation
            })
        })?;
        tracing::debug!(simulation_id, "simulation created");
        self.completion.finish(container, navigator);
        Ok(())
    }
}
