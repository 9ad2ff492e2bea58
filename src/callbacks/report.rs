use super::{commit, non_empty_id, non_empty_label, CallbackError, Navigator};
use crate::ingredients::{ReportState, SimulationIndex, SimulationState, UserSimulation};
use crate::lens::Lens;

/// Steps the report callbacks navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportModes<M> {
    pub simulation_selection: M,
    pub report_setup: M,
    pub simulation_setup: M,
}

pub struct ReportCallbacks<C, M> {
    report: Lens<C, ReportState>,
    active: Lens<C, SimulationIndex>,
    modes: ReportModes<M>,
}

/// `active` focuses the simulation slot the user is currently editing.
pub fn create_report_callbacks<C, M: Clone>(
    report: Lens<C, ReportState>,
    active: Lens<C, SimulationIndex>,
    modes: ReportModes<M>,
) -> ReportCallbacks<C, M> {
    ReportCallbacks {
        report,
        active,
        modes,
    }
}

fn validate_year(year: &str) -> Result<String, CallbackError> {
    let trimmed = year.trim();
    if trimmed.len() != 4 || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CallbackError::InvalidYear {
            year: year.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl<C, M: Clone> ReportCallbacks<C, M> {
    pub fn update_label(&self, container: &mut C, label: &str) -> Result<(), CallbackError> {
        let label = non_empty_label("report", label)?;
        commit(container, &self.report, |report| {
            Ok(ReportState {
                label: Some(label),
                ..report
            })
        })
    }

    pub fn update_year(&self, container: &mut C, year: &str) -> Result<(), CallbackError> {
        let year = validate_year(year)?;
        commit(container, &self.report, |report| Ok(ReportState { year, ..report }))
    }

    pub fn navigate_to_simulation_selection(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        index: SimulationIndex,
    ) -> Result<(), CallbackError> {
        commit(container, &self.active, |_| Ok(index))?;
        navigator.navigate_to(self.modes.simulation_selection.clone());
        Ok(())
    }

    pub fn handle_select_existing_simulation(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
        existing: &UserSimulation,
    ) -> Result<(), CallbackError> {
        let id = non_empty_id("simulation", &existing.id)?;
        let index = self.active.get(container);
        commit(container, &self.report, |mut report| {
            report.simulations[index.index()] = SimulationState {
                id: Some(id),
                label: existing.label.clone(),
                policy: existing.policy.clone(),
                population: existing.population.clone(),
            };
            Ok(report)
        })?;
        tracing::debug!(simulation_id = %existing.id, slot = index.as_str(), "existing simulation selected");
        navigator.navigate_to(self.modes.report_setup.clone());
        Ok(())
    }

    /// Seeds the reform slot with the baseline population, so both
    /// simulations of a report compare the same households.
    pub fn prefill_population2_from_simulation1(&self, container: &mut C) -> Result<(), CallbackError> {
        commit(container, &self.report, |mut report| {
            let population = report.simulations[0].population.clone();
            if !population.is_created() {
                return Err(CallbackError::MissingPopulation { index: "baseline" });
            }
            report.simulations[1].population = population;
            Ok(report)
        })
    }

    pub fn copy_population_from_other_simulation(
        &self,
        container: &mut C,
        navigator: &mut dyn Navigator<M>,
    ) -> Result<(), CallbackError> {
        let index = self.active.get(container);
        let other = index.other();
        commit(container, &self.report, |mut report| {
            let population = report.simulations[other.index()].population.clone();
            if !population.is_created() {
                return Err(CallbackError::MissingPopulation {
                    index: other.as_str(),
                });
            }
            report.simulations[index.index()].population = population;
            Ok(report)
        })?;
        navigator.navigate_to(self.modes.simulation_setup.clone());
        Ok(())
    }
}
