//! The report wizard: two simulations, each with a policy and a population,
//! edited through the shared step callbacks.

use super::error::PathwayError;
use super::labels::{
    default_policy_label, default_population_label, default_simulation_label, label_or_default,
    PathwayMode, CURRENT_LAW_LABEL,
};
use super::navigation::PathwayNavigation;
use super::skip::{ChoiceState, ExistingData, SkipDecision, StepGate};
use crate::callbacks::{
    create_policy_callbacks, create_population_callbacks, create_report_callbacks,
    create_simulation_callbacks, Navigator, PolicyCallbacks, PopulationCallbacks, ReportCallbacks,
    ReportModes, SimulationCallbacks,
};
use crate::flow::ComponentKey;
use crate::ingredients::{
    initialize_report_state, is_supported_country, ParameterChange, PopulationScope,
    PopulationState, ReportState, SimulationIndex, SimulationState, UserGeography, UserHousehold,
    UserPolicy, UserSimulation,
};
use crate::lens::Lens;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportViewMode {
    ReportLabel,
    ReportSetup,
    ReportSelectSimulation,
    ReportSelectExistingSimulation,
    ReportSubmit,
    SimulationLabel,
    SimulationSetup,
    SimulationSubmit,
    SetupPolicy,
    SetupPopulation,
    PolicyLabel,
    PolicyParameterSelector,
    PolicySubmit,
    SelectExistingPolicy,
    PopulationScope,
    PopulationLabel,
    PopulationHouseholdBuilder,
    PopulationGeographicConfirm,
    SelectExistingPopulation,
}

impl ReportViewMode {
    pub const ALL: [ReportViewMode; 19] = [
        Self::ReportLabel,
        Self::ReportSetup,
        Self::ReportSelectSimulation,
        Self::ReportSelectExistingSimulation,
        Self::ReportSubmit,
        Self::SimulationLabel,
        Self::SimulationSetup,
        Self::SimulationSubmit,
        Self::SetupPolicy,
        Self::SetupPopulation,
        Self::PolicyLabel,
        Self::PolicyParameterSelector,
        Self::PolicySubmit,
        Self::SelectExistingPolicy,
        Self::PopulationScope,
        Self::PopulationLabel,
        Self::PopulationHouseholdBuilder,
        Self::PopulationGeographicConfirm,
        Self::SelectExistingPopulation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReportLabel => "report_label",
            Self::ReportSetup => "report_setup",
            Self::ReportSelectSimulation => "report_select_simulation",
            Self::ReportSelectExistingSimulation => "report_select_existing_simulation",
            Self::ReportSubmit => "report_submit",
            Self::SimulationLabel => "simulation_label",
            Self::SimulationSetup => "simulation_setup",
            Self::SimulationSubmit => "simulation_submit",
            Self::SetupPolicy => "setup_policy",
            Self::SetupPopulation => "setup_population",
            Self::PolicyLabel => "policy_label",
            Self::PolicyParameterSelector => "policy_parameter_selector",
            Self::PolicySubmit => "policy_submit",
            Self::SelectExistingPolicy => "select_existing_policy",
            Self::PopulationScope => "population_scope",
            Self::PopulationLabel => "population_label",
            Self::PopulationHouseholdBuilder => "population_household_builder",
            Self::PopulationGeographicConfirm => "population_geographic_confirm",
            Self::SelectExistingPopulation => "select_existing_population",
        }
    }

    pub fn component(self) -> ComponentKey {
        match self {
            Self::ReportLabel => ComponentKey::ReportLabel,
            Self::ReportSetup => ComponentKey::ReportSetup,
            Self::ReportSelectSimulation => ComponentKey::ReportSelectSimulation,
            Self::ReportSelectExistingSimulation => ComponentKey::ReportSelectExistingSimulation,
            Self::ReportSubmit => ComponentKey::ReportSubmit,
            Self::SimulationLabel => ComponentKey::SimulationLabel,
            Self::SimulationSetup => ComponentKey::SimulationSetup,
            Self::SimulationSubmit => ComponentKey::SimulationSubmit,
            Self::SetupPolicy => ComponentKey::SimulationSetupPolicy,
            Self::SetupPopulation => ComponentKey::SimulationSetupPopulation,
            Self::PolicyLabel => ComponentKey::PolicyLabel,
            Self::PolicyParameterSelector => ComponentKey::PolicyParameterSelector,
            Self::PolicySubmit => ComponentKey::PolicySubmit,
            Self::SelectExistingPolicy => ComponentKey::SimulationSelectExistingPolicy,
            Self::PopulationScope => ComponentKey::PopulationScope,
            Self::PopulationLabel => ComponentKey::PopulationLabel,
            Self::PopulationHouseholdBuilder => ComponentKey::HouseholdBuilder,
            Self::PopulationGeographicConfirm => ComponentKey::GeographicConfirmation,
            Self::SelectExistingPopulation => ComponentKey::SimulationSelectExistingPopulation,
        }
    }
}

impl std::fmt::Display for ReportViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container the report callbacks are focused into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPathwayState {
    pub report: ReportState,
    pub active: SimulationIndex,
}

impl ReportPathwayState {
    pub fn active_simulation(&self) -> &SimulationState {
        self.report.simulation(self.active)
    }

    pub fn other_simulation(&self) -> &SimulationState {
        self.report.simulation(self.active.other())
    }

    fn report_lens() -> Lens<Self, ReportState> {
        Lens::new(
            |state: &Self| state.report.clone(),
            |state: &Self, report: ReportState| Self {
                report,
                active: state.active,
            },
        )
    }

    fn active_lens() -> Lens<Self, SimulationIndex> {
        Lens::new(
            |state: &Self| state.active,
            |state: &Self, active: SimulationIndex| Self {
                report: state.report.clone(),
                active,
            },
        )
    }

    /// Follows `active`, so one set of callbacks serves both slots.
    fn active_simulation_lens() -> Lens<Self, SimulationState> {
        Lens::new(
            |state: &Self| state.active_simulation().clone(),
            |state: &Self, simulation: SimulationState| {
                let mut next = state.clone();
                next.report.simulations[state.active.index()] = simulation;
                next
            },
        )
    }
}

/// Everything a renderer needs for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub mode: ReportViewMode,
    pub component: ComponentKey,
    pub active: SimulationIndex,
    pub can_go_back: bool,
    pub default_label: Option<String>,
    pub gate: Option<StepGate>,
    pub population_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub country_id: String,
    pub year: String,
    pub simulation_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

pub fn report_output_path(country_id: &str, report_id: &str) -> String {
    format!("/{country_id}/report-output/{report_id}")
}

type Mode = ReportViewMode;

pub struct ReportPathway {
    state: ReportPathwayState,
    navigation: PathwayNavigation<Mode>,
    existing: ExistingData,
    current_law_id: String,
    policy: PolicyCallbacks<ReportPathwayState, Mode>,
    population: PopulationCallbacks<ReportPathwayState, Mode>,
    simulation: SimulationCallbacks<ReportPathwayState, Mode>,
    report: ReportCallbacks<ReportPathwayState, Mode>,
}

impl ReportPathway {
    pub fn new(country_id: &str, current_law_id: &str) -> Result<Self, PathwayError> {
        if !is_supported_country(country_id) {
            return Err(PathwayError::UnsupportedCountry {
                country_id: country_id.to_string(),
            });
        }
        let simulation_lens = ReportPathwayState::active_simulation_lens();
        Ok(Self {
            state: ReportPathwayState {
                report: initialize_report_state(country_id),
                active: SimulationIndex::Baseline,
            },
            navigation: PathwayNavigation::new(Mode::ReportLabel),
            existing: ExistingData::default(),
            current_law_id: current_law_id.to_string(),
            policy: create_policy_callbacks(
                simulation_lens.compose(SimulationState::policy_lens()),
                Mode::SimulationSetup,
                None,
            ),
            population: create_population_callbacks(
                simulation_lens.compose(SimulationState::population_lens()),
                Mode::PopulationLabel,
                Mode::SimulationSetup,
                None,
            ),
            simulation: create_simulation_callbacks(simulation_lens, Mode::ReportSetup, None),
            report: create_report_callbacks(
                ReportPathwayState::report_lens(),
                ReportPathwayState::active_lens(),
                ReportModes {
                    simulation_selection: Mode::ReportSelectSimulation,
                    report_setup: Mode::ReportSetup,
                    simulation_setup: Mode::SimulationSetup,
                },
            ),
        })
    }

    pub fn state(&self) -> &ReportPathwayState {
        &self.state
    }

    pub fn report(&self) -> &ReportState {
        &self.state.report
    }

    pub fn current_mode(&self) -> Mode {
        *self.navigation.current_mode()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation.can_go_back()
    }

    pub fn go_back(&mut self) -> bool {
        self.navigation.go_back()
    }

    /// Latest fetch results. Skip decisions read this on every navigation.
    pub fn set_existing_data(&mut self, existing: ExistingData) {
        self.existing = existing;
    }

    pub fn existing_data(&self) -> &ExistingData {
        &self.existing
    }

    /// The population step is locked to whatever the other simulation uses,
    /// so both sides of a report compare the same population.
    pub fn is_population_locked(&self) -> bool {
        self.state.other_simulation().population.is_created()
    }

    pub fn current_view(&self) -> ReportView {
        let mode = self.current_mode();
        let active = self.state.active;
        let report_label = self.state.report.label.as_deref();
        let simulation = self.state.active_simulation();
        let (default_label, gate) = match mode {
            Mode::ReportLabel => (Some(label_or_default(report_label, || "My report".to_string())), None),
            Mode::ReportSelectSimulation | Mode::ReportSelectExistingSimulation => {
                (None, Some(self.existing.simulation_gate().shown()))
            }
            Mode::SimulationLabel => (
                Some(label_or_default(simulation.label.as_deref(), || {
                    default_simulation_label(PathwayMode::Report(active), report_label)
                })),
                None,
            ),
            Mode::SetupPolicy | Mode::SelectExistingPolicy => {
                (None, Some(self.existing.policy_gate().shown()))
            }
            Mode::PolicyLabel => (
                Some(label_or_default(simulation.policy.label.as_deref(), || {
                    default_policy_label(PathwayMode::Report(active), report_label)
                })),
                None,
            ),
            Mode::SetupPopulation | Mode::SelectExistingPopulation => {
                (None, Some(self.existing.population_gate().shown()))
            }
            Mode::PopulationLabel => (
                Some(label_or_default(simulation.population.label.as_deref(), || {
                    default_population_label(simulation.population.scope.as_ref())
                })),
                None,
            ),
            Mode::ReportSetup
            | Mode::ReportSubmit
            | Mode::SimulationSetup
            | Mode::SimulationSubmit
            | Mode::PolicyParameterSelector
            | Mode::PolicySubmit
            | Mode::PopulationScope
            | Mode::PopulationHouseholdBuilder
            | Mode::PopulationGeographicConfirm => (None, None),
        };
        ReportView {
            mode,
            component: mode.component(),
            active,
            can_go_back: self.can_go_back(),
            default_label,
            gate,
            population_locked: self.is_population_locked(),
        }
    }

    fn expect_mode(&self, action: &'static str, allowed: &[Mode]) -> Result<(), PathwayError> {
        let mode = self.current_mode();
        if allowed.contains(&mode) {
            return Ok(());
        }
        Err(PathwayError::WrongStep {
            action,
            mode: mode.as_str(),
        })
    }

    fn go(&mut self, mode: Mode) {
        tracing::debug!(from = %self.current_mode(), to = %mode, "report pathway step");
        self.navigation.navigate_to(mode);
    }

    fn require_choice(gate: StepGate, what: &'static str) -> Result<(), PathwayError> {
        match gate.load_existing {
            ChoiceState::Available => Ok(()),
            ChoiceState::Loading => Err(PathwayError::StillLoading { what }),
            ChoiceState::Unavailable => Err(PathwayError::NothingToLoad { what }),
        }
    }

    // Report level.

    pub fn update_report_label(&mut self, label: &str) -> Result<(), PathwayError> {
        self.report.update_label(&mut self.state, label)?;
        Ok(())
    }

    pub fn update_year(&mut self, year: &str) -> Result<(), PathwayError> {
        self.report.update_year(&mut self.state, year)?;
        Ok(())
    }

    pub fn continue_from_report_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::ReportLabel])?;
        self.go(Mode::ReportSetup);
        Ok(())
    }

    /// Baseline always shows the selection step because it offers the
    /// default baseline; reform skips straight to creation once simulations
    /// are known to be empty.
    pub fn navigate_to_simulation_selection(
        &mut self,
        index: SimulationIndex,
    ) -> Result<(), PathwayError> {
        self.expect_mode("select simulation", &[Mode::ReportSetup])?;
        let show = index == SimulationIndex::Baseline
            || self.existing.simulation_gate().decision == SkipDecision::Show;
        if show {
            self.report
                .navigate_to_simulation_selection(&mut self.state, &mut self.navigation, index)?;
        } else {
            self.state.active = index;
            tracing::debug!(slot = index.as_str(), "simulation selection skipped");
            self.go(Mode::SimulationLabel);
        }
        Ok(())
    }

    pub fn create_new_simulation(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("create simulation", &[Mode::ReportSelectSimulation])?;
        self.go(Mode::SimulationLabel);
        Ok(())
    }

    pub fn load_existing_simulation(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("load simulation", &[Mode::ReportSelectSimulation])?;
        Self::require_choice(self.existing.simulation_gate(), "simulations")?;
        self.go(Mode::ReportSelectExistingSimulation);
        Ok(())
    }

    pub fn select_existing_simulation(
        &mut self,
        existing: &UserSimulation,
    ) -> Result<(), PathwayError> {
        self.expect_mode("select simulation", &[Mode::ReportSelectExistingSimulation])?;
        self.ensure_compatible_population(&existing.population)?;
        self.report
            .handle_select_existing_simulation(&mut self.state, &mut self.navigation, existing)?;
        Ok(())
    }

    /// Takes a baseline simulation created on the user's behalf.
    pub fn select_default_baseline(
        &mut self,
        simulation: SimulationState,
    ) -> Result<(), PathwayError> {
        self.expect_mode("select default baseline", &[Mode::ReportSelectSimulation])?;
        if self.state.active != SimulationIndex::Baseline {
            return Err(PathwayError::WrongStep {
                action: "select default baseline",
                mode: self.current_mode().as_str(),
            });
        }
        if simulation.id.as_deref().map_or(true, str::is_empty) {
            return Err(PathwayError::IncompleteSimulation { index: "baseline" });
        }
        self.ensure_compatible_population(&simulation.population)?;
        self.state.report.simulations[SimulationIndex::Baseline.index()] = simulation;
        self.go(Mode::ReportSetup);
        Ok(())
    }

    pub fn continue_to_report_submit(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::ReportSetup])?;
        if self.state.report.simulations[0].id.is_none() {
            return Err(PathwayError::MissingBaselineSimulation);
        }
        self.go(Mode::ReportSubmit);
        Ok(())
    }

    /// Payload for creating the report. The baseline simulation is required,
    /// the reform one is optional.
    pub fn submit(&self) -> Result<ReportSubmission, PathwayError> {
        let report = &self.state.report;
        let baseline = report.simulations[0]
            .id
            .clone()
            .ok_or(PathwayError::MissingBaselineSimulation)?;
        let mut simulation_ids = vec![baseline];
        simulation_ids.extend(report.simulations[1].id.clone());
        tracing::info!(
            country_id = %report.country_id,
            year = %report.year,
            simulations = simulation_ids.len(),
            "report submission prepared"
        );
        Ok(ReportSubmission {
            country_id: report.country_id.clone(),
            year: report.year.clone(),
            simulation_ids,
            api_version: report.api_version.clone(),
        })
    }

    // Simulation level.

    pub fn update_simulation_label(&mut self, label: &str) -> Result<(), PathwayError> {
        self.simulation.update_label(&mut self.state, label)?;
        Ok(())
    }

    pub fn continue_from_simulation_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::SimulationLabel])?;
        self.go(Mode::SimulationSetup);
        Ok(())
    }

    pub fn continue_to_simulation_submit(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::SimulationSetup])?;
        if !self.state.active_simulation().is_configured() {
            return Err(PathwayError::IncompleteSimulation {
                index: self.state.active.as_str(),
            });
        }
        self.go(Mode::SimulationSubmit);
        Ok(())
    }

    pub fn simulation_submitted(&mut self, simulation_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("submit simulation", &[Mode::SimulationSubmit])?;
        self.simulation
            .handle_submit_success(&mut self.state, &mut self.navigation, simulation_id)?;
        Ok(())
    }

    // Policy.

    /// Always shown in a report: current law is offered even with no saved
    /// policies.
    pub fn navigate_to_policy(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("setup policy", &[Mode::SimulationSetup])?;
        self.go(Mode::SetupPolicy);
        Ok(())
    }

    pub fn select_current_law(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("select current law", &[Mode::SetupPolicy])?;
        self.policy.handle_select_current_law(
            &mut self.state,
            &mut self.navigation,
            &self.current_law_id,
            CURRENT_LAW_LABEL,
        )?;
        Ok(())
    }

    pub fn create_new_policy(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("create policy", &[Mode::SetupPolicy])?;
        self.go(Mode::PolicyLabel);
        Ok(())
    }

    pub fn load_existing_policy(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("load policy", &[Mode::SetupPolicy])?;
        Self::require_choice(self.existing.policy_gate(), "policies")?;
        self.go(Mode::SelectExistingPolicy);
        Ok(())
    }

    pub fn select_existing_policy(&mut self, existing: &UserPolicy) -> Result<(), PathwayError> {
        self.expect_mode("select policy", &[Mode::SelectExistingPolicy])?;
        self.policy
            .handle_select_existing(&mut self.state, &mut self.navigation, existing)?;
        Ok(())
    }

    pub fn update_policy_label(&mut self, label: &str) -> Result<(), PathwayError> {
        self.policy.update_label(&mut self.state, label)?;
        Ok(())
    }

    pub fn continue_from_policy_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::PolicyLabel])?;
        self.go(Mode::PolicyParameterSelector);
        Ok(())
    }

    pub fn update_policy(&mut self, changes: Vec<ParameterChange>) -> Result<(), PathwayError> {
        self.policy.update_policy(&mut self.state, changes)?;
        Ok(())
    }

    pub fn continue_to_policy_submit(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::PolicyParameterSelector])?;
        self.go(Mode::PolicySubmit);
        Ok(())
    }

    pub fn policy_submitted(&mut self, policy_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("submit policy", &[Mode::PolicySubmit])?;
        self.policy
            .handle_submit_success(&mut self.state, &mut self.navigation, policy_id)?;
        Ok(())
    }

    // Population.

    /// Shows the selection step when it is locked or may have something to
    /// pick; otherwise goes straight to scope selection.
    pub fn navigate_to_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("setup population", &[Mode::SimulationSetup])?;
        if self.is_population_locked()
            || self.existing.population_gate().decision == SkipDecision::Show
        {
            self.go(Mode::SetupPopulation);
        } else {
            tracing::debug!("population selection skipped");
            self.go(Mode::PopulationScope);
        }
        Ok(())
    }

    pub fn copy_population_from_other(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("copy population", &[Mode::SetupPopulation])?;
        self.report
            .copy_population_from_other_simulation(&mut self.state, &mut self.navigation)?;
        Ok(())
    }

    pub fn prefill_reform_population(&mut self) -> Result<(), PathwayError> {
        self.report.prefill_population2_from_simulation1(&mut self.state)?;
        Ok(())
    }

    fn ensure_population_unlocked(&self, action: &'static str) -> Result<(), PathwayError> {
        if self.is_population_locked() {
            return Err(PathwayError::PopulationLocked { action });
        }
        Ok(())
    }

    /// A locked report only accepts simulations built on the other side's
    /// population.
    fn ensure_compatible_population(&self, population: &PopulationState) -> Result<(), PathwayError> {
        if !self.is_population_locked() {
            return Ok(());
        }
        let expected = self.state.other_simulation().population.population_id();
        let found = population.population_id();
        if found == expected {
            return Ok(());
        }
        Err(PathwayError::IncompatiblePopulation {
            expected: expected.unwrap_or_default().to_string(),
            found: found.unwrap_or("none").to_string(),
        })
    }

    pub fn create_new_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("create population", &[Mode::SetupPopulation])?;
        self.ensure_population_unlocked("create population")?;
        self.go(Mode::PopulationScope);
        Ok(())
    }

    pub fn load_existing_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("load population", &[Mode::SetupPopulation])?;
        self.ensure_population_unlocked("load population")?;
        Self::require_choice(self.existing.population_gate(), "populations")?;
        self.go(Mode::SelectExistingPopulation);
        Ok(())
    }

    pub fn select_existing_household(
        &mut self,
        household: &UserHousehold,
    ) -> Result<(), PathwayError> {
        self.expect_mode("select household", &[Mode::SelectExistingPopulation])?;
        self.population
            .handle_select_existing_household(&mut self.state, &mut self.navigation, household)?;
        Ok(())
    }

    pub fn select_existing_geography(
        &mut self,
        geography: &UserGeography,
    ) -> Result<(), PathwayError> {
        self.expect_mode("select geography", &[Mode::SelectExistingPopulation])?;
        self.population
            .handle_select_existing_geography(&mut self.state, &mut self.navigation, geography)?;
        Ok(())
    }

    pub fn select_population_scope(&mut self, scope: PopulationScope) -> Result<(), PathwayError> {
        self.expect_mode("select scope", &[Mode::PopulationScope])?;
        self.population
            .handle_scope_selected(&mut self.state, &mut self.navigation, scope)?;
        Ok(())
    }

    pub fn update_population_label(&mut self, label: &str) -> Result<(), PathwayError> {
        self.population.update_label(&mut self.state, label)?;
        Ok(())
    }

    /// Households go to the builder, geographies to confirmation.
    pub fn continue_from_population_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::PopulationLabel])?;
        let next = match self.state.active_simulation().population.scope {
            Some(PopulationScope::Geography { .. }) => Mode::PopulationGeographicConfirm,
            Some(PopulationScope::Household) | None => Mode::PopulationHouseholdBuilder,
        };
        self.go(next);
        Ok(())
    }

    pub fn household_submitted(&mut self, household_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("submit household", &[Mode::PopulationHouseholdBuilder])?;
        self.population.handle_household_submit_success(
            &mut self.state,
            &mut self.navigation,
            household_id,
        )?;
        Ok(())
    }

    pub fn geography_confirmed(&mut self, geography_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("confirm geography", &[Mode::PopulationGeographicConfirm])?;
        self.population.handle_geographic_submit_success(
            &mut self.state,
            &mut self.navigation,
            geography_id,
        )?;
        Ok(())
    }

    pub fn active_population(&self) -> &PopulationState {
        &self.state.active_simulation().population
    }
}
