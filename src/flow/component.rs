use serde::{Deserialize, Serialize};

/// Step renderers known to the calculator. Frames name one of these; an
/// unknown name fails when the catalog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ComponentKey {
    PolicyLabel,
    PolicyParameterSelector,
    PolicySubmit,
    PolicyList,
    PopulationScope,
    PopulationLabel,
    HouseholdBuilder,
    GeographicConfirmation,
    PopulationList,
    SimulationLabel,
    SimulationSetup,
    SimulationSetupPolicy,
    SimulationSelectExistingPolicy,
    SimulationSetupPopulation,
    SimulationSelectExistingPopulation,
    SimulationSubmit,
    SimulationList,
    ReportLabel,
    ReportSetup,
    ReportSelectSimulation,
    ReportSelectExistingSimulation,
    ReportSubmit,
}

pub const ALL_COMPONENTS: [ComponentKey; 22] = [
    ComponentKey::PolicyLabel,
    ComponentKey::PolicyParameterSelector,
    ComponentKey::PolicySubmit,
    ComponentKey::PolicyList,
    ComponentKey::PopulationScope,
    ComponentKey::PopulationLabel,
    ComponentKey::HouseholdBuilder,
    ComponentKey::GeographicConfirmation,
    ComponentKey::PopulationList,
    ComponentKey::SimulationLabel,
    ComponentKey::SimulationSetup,
    ComponentKey::SimulationSetupPolicy,
    ComponentKey::SimulationSelectExistingPolicy,
    ComponentKey::SimulationSetupPopulation,
    ComponentKey::SimulationSelectExistingPopulation,
    ComponentKey::SimulationSubmit,
    ComponentKey::SimulationList,
    ComponentKey::ReportLabel,
    ComponentKey::ReportSetup,
    ComponentKey::ReportSelectSimulation,
    ComponentKey::ReportSelectExistingSimulation,
    ComponentKey::ReportSubmit,
];

impl ComponentKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PolicyLabel => "policy_label",
            Self::PolicyParameterSelector => "policy_parameter_selector",
            Self::PolicySubmit => "policy_submit",
            Self::PolicyList => "policy_list",
            Self::PopulationScope => "population_scope",
            Self::PopulationLabel => "population_label",
            Self::HouseholdBuilder => "household_builder",
            Self::GeographicConfirmation => "geographic_confirmation",
            Self::PopulationList => "population_list",
            Self::SimulationLabel => "simulation_label",
            Self::SimulationSetup => "simulation_setup",
            Self::SimulationSetupPolicy => "simulation_setup_policy",
            Self::SimulationSelectExistingPolicy => "simulation_select_existing_policy",
            Self::SimulationSetupPopulation => "simulation_setup_population",
            Self::SimulationSelectExistingPopulation => "simulation_select_existing_population",
            Self::SimulationSubmit => "simulation_submit",
            Self::SimulationList => "simulation_list",
            Self::ReportLabel => "report_label",
            Self::ReportSetup => "report_setup",
            Self::ReportSelectSimulation => "report_select_simulation",
            Self::ReportSelectExistingSimulation => "report_select_existing_simulation",
            Self::ReportSubmit => "report_submit",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase();
        ALL_COMPONENTS
            .iter()
            .copied()
            .find(|component| component.as_str() == normalized)
            .ok_or_else(|| format!("unknown component `{raw}`"))
    }

    /// Heading shown by the terminal renderer.
    pub fn title(self) -> &'static str {
        match self {
            Self::PolicyLabel => "Create policy",
            Self::PolicyParameterSelector => "Select policy parameters",
            Self::PolicySubmit => "Review policy",
            Self::PolicyList => "Your saved policies",
            Self::PopulationScope => "Choose population scope",
            Self::PopulationLabel => "Name your population",
            Self::HouseholdBuilder => "Build household",
            Self::GeographicConfirmation => "Confirm geography",
            Self::PopulationList => "Your saved populations",
            Self::SimulationLabel => "Create simulation",
            Self::SimulationSetup => "Configure simulation",
            Self::SimulationSetupPolicy => "Select policy",
            Self::SimulationSelectExistingPolicy => "Select an existing policy",
            Self::SimulationSetupPopulation => "Select population",
            Self::SimulationSelectExistingPopulation => "Select an existing population",
            Self::SimulationSubmit => "Review simulation",
            Self::SimulationList => "Your saved simulations",
            Self::ReportLabel => "Create report",
            Self::ReportSetup => "Configure report",
            Self::ReportSelectSimulation => "Select simulation",
            Self::ReportSelectExistingSimulation => "Select an existing simulation",
            Self::ReportSubmit => "Review report",
        }
    }

    /// What a naming step creates, for the primary action label.
    pub fn label_subject(self) -> Option<&'static str> {
        match self {
            Self::PolicyLabel => Some("policy"),
            Self::PopulationLabel => Some("population"),
            Self::SimulationLabel => Some("simulation"),
            Self::ReportLabel => Some("report"),
            _ => None,
        }
    }
}

impl TryFrom<String> for ComponentKey {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
