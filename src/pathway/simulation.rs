//! Standalone simulation wizard. Reuses the report's policy and population
//! callbacks, focused on a bare `SimulationState` instead of a report slot.

use super::error::PathwayError;
use super::labels::{
    default_policy_label, default_population_label, default_simulation_label, label_or_default,
    PathwayMode, CURRENT_LAW_LABEL,
};
use super::navigation::PathwayNavigation;
use super::skip::{ChoiceState, ExistingData, SkipDecision, StepGate};
use crate::callbacks::{
    create_policy_callbacks, create_population_callbacks, create_simulation_callbacks,
    CompletionHook, Navigator, PolicyCallbacks, PopulationCallbacks, SimulationCallbacks,
};
use crate::flow::ComponentKey;
use crate::ingredients::{
    is_supported_country, ParameterChange, PopulationScope, SimulationState, UserGeography,
    UserHousehold, UserPolicy,
};
use crate::lens::Lens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationViewMode {
    Label,
    Setup,
    SetupPolicy,
    SelectExistingPolicy,
    PolicyLabel,
    PolicyParameterSelector,
    PolicySubmit,
    SetupPopulation,
    SelectExistingPopulation,
    PopulationScope,
    PopulationLabel,
    HouseholdBuilder,
    GeographicConfirm,
    Submit,
}

impl SimulationViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Setup => "setup",
            Self::SetupPolicy => "setup_policy",
            Self::SelectExistingPolicy => "select_existing_policy",
            Self::PolicyLabel => "policy_label",
            Self::PolicyParameterSelector => "policy_parameter_selector",
            Self::PolicySubmit => "policy_submit",
            Self::SetupPopulation => "setup_population",
            Self::SelectExistingPopulation => "select_existing_population",
            Self::PopulationScope => "population_scope",
            Self::PopulationLabel => "population_label",
            Self::HouseholdBuilder => "household_builder",
            Self::GeographicConfirm => "geographic_confirm",
            Self::Submit => "submit",
        }
    }

    pub fn component(self) -> ComponentKey {
        match self {
            Self::Label => ComponentKey::SimulationLabel,
            Self::Setup => ComponentKey::SimulationSetup,
            Self::SetupPolicy => ComponentKey::SimulationSetupPolicy,
            Self::SelectExistingPolicy => ComponentKey::SimulationSelectExistingPolicy,
            Self::PolicyLabel => ComponentKey::PolicyLabel,
            Self::PolicyParameterSelector => ComponentKey::PolicyParameterSelector,
            Self::PolicySubmit => ComponentKey::PolicySubmit,
            Self::SetupPopulation => ComponentKey::SimulationSetupPopulation,
            Self::SelectExistingPopulation => ComponentKey::SimulationSelectExistingPopulation,
            Self::PopulationScope => ComponentKey::PopulationScope,
            Self::PopulationLabel => ComponentKey::PopulationLabel,
            Self::HouseholdBuilder => ComponentKey::HouseholdBuilder,
            Self::GeographicConfirm => ComponentKey::GeographicConfirmation,
            Self::Submit => ComponentKey::SimulationSubmit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationView {
    pub mode: SimulationViewMode,
    pub component: ComponentKey,
    pub can_go_back: bool,
    pub default_label: Option<String>,
    pub gate: Option<StepGate>,
}

type Mode = SimulationViewMode;

pub struct SimulationPathway {
    state: SimulationState,
    navigation: PathwayNavigation<Mode>,
    existing: ExistingData,
    current_law_id: String,
    policy: PolicyCallbacks<SimulationState, Mode>,
    population: PopulationCallbacks<SimulationState, Mode>,
    simulation: SimulationCallbacks<SimulationState, Mode>,
}

impl SimulationPathway {
    /// `on_complete` runs once the simulation is created; without it the
    /// wizard stays on the submit step.
    pub fn new(
        country_id: &str,
        current_law_id: &str,
        on_complete: Option<CompletionHook<SimulationState>>,
    ) -> Result<Self, PathwayError> {
        if !is_supported_country(country_id) {
            return Err(PathwayError::UnsupportedCountry {
                country_id: country_id.to_string(),
            });
        }
        Ok(Self {
            state: SimulationState::default(),
            navigation: PathwayNavigation::new(Mode::Label),
            existing: ExistingData::default(),
            current_law_id: current_law_id.to_string(),
            policy: create_policy_callbacks(SimulationState::policy_lens(), Mode::Setup, None),
            population: create_population_callbacks(
                SimulationState::population_lens(),
                Mode::PopulationLabel,
                Mode::Setup,
                None,
            ),
            simulation: create_simulation_callbacks(Lens::identity(), Mode::Submit, on_complete),
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn current_mode(&self) -> Mode {
        *self.navigation.current_mode()
    }

    pub fn go_back(&mut self) -> bool {
        self.navigation.go_back()
    }

    pub fn set_existing_data(&mut self, existing: ExistingData) {
        self.existing = existing;
    }

    pub fn is_complete(&self) -> bool {
        self.state.id.is_some()
    }

    pub fn current_view(&self) -> SimulationView {
        let mode = self.current_mode();
        let standalone = PathwayMode::Standalone;
        let (default_label, gate) = match mode {
            Mode::Label => (
                Some(label_or_default(self.state.label.as_deref(), || {
                    default_simulation_label(standalone, None)
                })),
                None,
            ),
            Mode::PolicyLabel => (
                Some(label_or_default(self.state.policy.label.as_deref(), || {
                    default_policy_label(standalone, None)
                })),
                None,
            ),
            Mode::PopulationLabel => (
                Some(label_or_default(self.state.population.label.as_deref(), || {
                    default_population_label(self.state.population.scope.as_ref())
                })),
                None,
            ),
            Mode::SetupPolicy | Mode::SelectExistingPolicy => {
                (None, Some(self.existing.policy_gate().shown()))
            }
            Mode::SetupPopulation | Mode::SelectExistingPopulation => {
                (None, Some(self.existing.population_gate().shown()))
            }
            Mode::Setup
            | Mode::PolicyParameterSelector
            | Mode::PolicySubmit
            | Mode::PopulationScope
            | Mode::HouseholdBuilder
            | Mode::GeographicConfirm
            | Mode::Submit => (None, None),
        };
        SimulationView {
            mode,
            component: mode.component(),
            can_go_back: self.navigation.can_go_back(),
            default_label,
            gate,
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
        tracing::debug!(from = self.current_mode().as_str(), to = mode.as_str(), "simulation pathway step");
        self.navigation.navigate_to(mode);
    }

    fn require_choice(gate: StepGate, what: &'static str) -> Result<(), PathwayError> {
        match gate.load_existing {
            ChoiceState::Available => Ok(()),
            ChoiceState::Loading => Err(PathwayError::StillLoading { what }),
            ChoiceState::Unavailable => Err(PathwayError::NothingToLoad { what }),
        }
    }

    pub fn update_label(&mut self, label: &str) -> Result<(), PathwayError> {
        self.simulation.update_label(&mut self.state, label)?;
        Ok(())
    }

    pub fn continue_from_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::Label])?;
        self.go(Mode::Setup);
        Ok(())
    }

    /// Standalone pathways skip the policy choice once saved policies are
    /// known to be empty.
    pub fn navigate_to_policy(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("setup policy", &[Mode::Setup])?;
        match self.existing.policy_gate().decision {
            SkipDecision::Show => self.go(Mode::SetupPolicy),
            SkipDecision::Skip => self.go(Mode::PolicyLabel),
        }
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

    pub fn navigate_to_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("setup population", &[Mode::Setup])?;
        match self.existing.population_gate().decision {
            SkipDecision::Show => self.go(Mode::SetupPopulation),
            SkipDecision::Skip => self.go(Mode::PopulationScope),
        }
        Ok(())
    }

    pub fn create_new_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("create population", &[Mode::SetupPopulation])?;
        self.go(Mode::PopulationScope);
        Ok(())
    }

    pub fn load_existing_population(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("load population", &[Mode::SetupPopulation])?;
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

    pub fn continue_from_population_label(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::PopulationLabel])?;
        let next = match self.state.population.scope {
            Some(PopulationScope::Geography { .. }) => Mode::GeographicConfirm,
            Some(PopulationScope::Household) | None => Mode::HouseholdBuilder,
        };
        self.go(next);
        Ok(())
    }

    pub fn household_submitted(&mut self, household_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("submit household", &[Mode::HouseholdBuilder])?;
        self.population.handle_household_submit_success(
            &mut self.state,
            &mut self.navigation,
            household_id,
        )?;
        Ok(())
    }

    pub fn geography_confirmed(&mut self, geography_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("confirm geography", &[Mode::GeographicConfirm])?;
        self.population.handle_geographic_submit_success(
            &mut self.state,
            &mut self.navigation,
            geography_id,
        )?;
        Ok(())
    }

    pub fn continue_to_submit(&mut self) -> Result<(), PathwayError> {
        self.expect_mode("continue", &[Mode::Setup])?;
        if !self.state.is_configured() {
            return Err(PathwayError::IncompleteSimulation { index: "standalone" });
        }
        self.go(Mode::Submit);
        Ok(())
    }

    pub fn simulation_submitted(&mut self, simulation_id: &str) -> Result<(), PathwayError> {
        self.expect_mode("submit simulation", &[Mode::Submit])?;
        self.simulation
            .handle_submit_success(&mut self.state, &mut self.navigation, simulation_id)?;
        Ok(())
    }
}
