use crate::ingredients::{PopulationScope, SimulationIndex};

pub const CURRENT_LAW_LABEL: &str = "Current law";

/// Presentation only: which default copy a pathway shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathwayMode {
    Standalone,
    Report(SimulationIndex),
}

fn default_label(mode: PathwayMode, report_label: Option<&str>, noun: &str) -> String {
    match mode {
        PathwayMode::Standalone => format!("My {noun}"),
        PathwayMode::Report(index) => {
            let slot = index.as_str();
            match report_label.map(str::trim).filter(|label| !label.is_empty()) {
                Some(report) => format!("{report} {slot} {noun}"),
                None => {
                    let mut chars = slot.chars();
                    let capitalized = chars
                        .next()
                        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                        .unwrap_or_default();
                    format!("{capitalized} {noun}")
                }
            }
        }
    }
}

pub fn default_simulation_label(mode: PathwayMode, report_label: Option<&str>) -> String {
    default_label(mode, report_label, "simulation")
}

pub fn default_policy_label(mode: PathwayMode, report_label: Option<&str>) -> String {
    default_label(mode, report_label, "policy")
}

pub fn default_population_label(scope: Option<&PopulationScope>) -> String {
    match scope {
        Some(PopulationScope::Household) | None => "Custom Household".to_string(),
        Some(PopulationScope::Geography { region: None }) => "National Households".to_string(),
        Some(PopulationScope::Geography {
            region: Some(region),
        }) => format!("Households in {region}"),
    }
}

/// Uses the existing label when present, the mode default otherwise.
pub fn label_or_default(existing: Option<&str>, default: impl FnOnce() -> String) -> String {
    existing
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default)
}

/// Button verb, spelled for the country.
pub fn initialize_verb(country_id: &str) -> &'static str {
    if country_id == "uk" {
        "Initialise"
    } else {
        "Initialize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_labels_follow_mode() {
        assert_eq!(
            default_simulation_label(PathwayMode::Standalone, None),
            "My simulation"
        );
        assert_eq!(
            default_simulation_label(PathwayMode::Report(SimulationIndex::Baseline), None),
            "Baseline simulation"
        );
        assert_eq!(
            default_simulation_label(PathwayMode::Report(SimulationIndex::Reform), None),
            "Reform simulation"
        );
        assert_eq!(
            default_simulation_label(
                PathwayMode::Report(SimulationIndex::Baseline),
                Some("My Report")
            ),
            "My Report baseline simulation"
        );
    }

    #[test]
    fn policy_labels_follow_mode() {
        assert_eq!(default_policy_label(PathwayMode::Standalone, None), "My policy");
        assert_eq!(
            default_policy_label(PathwayMode::Report(SimulationIndex::Baseline), Some("  ")),
            "Baseline policy"
        );
    }

    #[test]
    fn population_labels_follow_scope() {
        assert_eq!(
            default_population_label(Some(&PopulationScope::Household)),
            "Custom Household"
        );
        assert_eq!(
            default_population_label(Some(&PopulationScope::Geography { region: None })),
            "National Households"
        );
        assert_eq!(
            default_population_label(Some(&PopulationScope::Geography {
                region: Some("state/ca".to_string())
            })),
            "Households in state/ca"
        );
    }

    #[test]
    fn existing_label_wins_over_default() {
        assert_eq!(
            label_or_default(Some("My Household"), || "Custom Household".to_string()),
            "My Household"
        );
        assert_eq!(
            label_or_default(None, || "Custom Household".to_string()),
            "Custom Household"
        );
        assert_eq!(initialize_verb("uk"), "Initialise");
        assert_eq!(initialize_verb("us"), "Initialize");
    }
}
