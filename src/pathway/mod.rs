pub mod error;
pub mod labels;
pub mod navigation;
pub mod report;
pub mod simulation;
pub mod skip;

pub use error::PathwayError;
pub use labels::{
    default_policy_label, default_population_label, default_simulation_label, initialize_verb,
    PathwayMode, CURRENT_LAW_LABEL,
};
pub use navigation::PathwayNavigation;
pub use report::{
    report_output_path, ReportPathway, ReportPathwayState, ReportSubmission, ReportView,
    ReportViewMode,
};
pub use simulation::{SimulationPathway, SimulationView, SimulationViewMode};
pub use skip::{resolve_gate, Availability, ChoiceState, ExistingData, SkipDecision, StepGate};
