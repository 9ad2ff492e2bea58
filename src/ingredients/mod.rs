//! Aggregate state edited by the calculator wizards, plus the records the
//! data layer hands in when the user picks something that already exists.

use crate::lens::Lens;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub const SUPPORTED_COUNTRIES: [&str; 5] = ["us", "uk", "ca", "ng", "il"];

pub fn is_supported_country(country_id: &str) -> bool {
    SUPPORTED_COUNTRIES.contains(&country_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChange {
    pub parameter: String,
    pub start_date: String,
    pub end_date: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyState {
    pub id: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterChange>,
}

impl PolicyState {
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PopulationScope {
    Household,
    /// `region: None` is the whole country.
    Geography { region: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationState {
    pub label: Option<String>,
    pub scope: Option<PopulationScope>,
    pub household_id: Option<String>,
    pub geography_id: Option<String>,
}

impl PopulationState {
    pub fn is_created(&self) -> bool {
        self.household_id.is_some() || self.geography_id.is_some()
    }

    pub fn population_id(&self) -> Option<&str> {
        self.household_id
            .as_deref()
            .or(self.geography_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub id: Option<String>,
    pub label: Option<String>,
    pub policy: PolicyState,
    pub population: PopulationState,
}

impl SimulationState {
    pub fn is_configured(&self) -> bool {
        self.policy.is_created() && self.population.is_created()
    }

    pub fn policy_lens() -> Lens<SimulationState, PolicyState> {
        Lens::new(
            |simulation: &SimulationState| simulation.policy.clone(),
            |simulation: &SimulationState, policy: PolicyState| SimulationState {
                policy,
                ..simulation.clone()
            },
        )
    }

    pub fn population_lens() -> Lens<SimulationState, PopulationState> {
        Lens::new(
            |simulation: &SimulationState| simulation.population.clone(),
            |simulation: &SimulationState, population: PopulationState| SimulationState {
                population,
                ..simulation.clone()
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationIndex {
    Baseline,
    Reform,
}

impl SimulationIndex {
    pub const ALL: [SimulationIndex; 2] = [SimulationIndex::Baseline, SimulationIndex::Reform];

    pub fn index(self) -> usize {
        match self {
            Self::Baseline => 0,
            Self::Reform => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Baseline => Self::Reform,
            Self::Reform => Self::Baseline,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Reform => "reform",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportState {
    pub id: Option<String>,
    pub label: Option<String>,
    pub year: String,
    pub country_id: String,
    pub api_version: Option<String>,
    pub simulations: [SimulationState; 2],
}

impl ReportState {
    pub fn simulation(&self, index: SimulationIndex) -> &SimulationState {
        &self.simulations[index.index()]
    }

    pub fn simulation_lens(index: SimulationIndex) -> Lens<ReportState, SimulationState> {
        Lens::new(
            move |report: &ReportState| report.simulations[index.index()].clone(),
            move |report: &ReportState, simulation: SimulationState| {
                let mut next = report.clone();
                next.simulations[index.index()] = simulation;
                next
            },
        )
    }

    pub fn report_policy_lens(index: SimulationIndex) -> Lens<ReportState, PolicyState> {
        Self::simulation_lens(index).compose(SimulationState::policy_lens())
    }

    pub fn report_population_lens(index: SimulationIndex) -> Lens<ReportState, PopulationState> {
        Self::simulation_lens(index).compose(SimulationState::population_lens())
    }
}

/// Fresh report for `country_id`, dated to the current calendar year.
pub fn initialize_report_state(country_id: &str) -> ReportState {
    ReportState {
        id: None,
        label: None,
        year: chrono::Local::now().year().to_string(),
        country_id: country_id.to_string(),
        api_version: None,
        simulations: [SimulationState::default(), SimulationState::default()],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPolicy {
    pub id: String,
    pub label: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHousehold {
    pub id: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGeography {
    /// Equals `country_id` for a national population.
    pub geography_id: String,
    pub country_id: String,
    pub label: Option<String>,
}

impl UserGeography {
    pub fn is_national(&self) -> bool {
        self.geography_id == self.country_id
    }

    pub fn scope(&self) -> PopulationScope {
        PopulationScope::Geography {
            region: (!self.is_national()).then(|| self.geography_id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSimulation {
    pub id: String,
    pub label: Option<String>,
    pub policy: PolicyState,
    pub population: PopulationState,
}
