//! Decides whether an optional "pick existing or create new" step is shown.
//!
//! Decisions are recomputed from the latest [`ExistingData`] on every
//! navigation and never stored. Data still loading always means the step is
//! shown: a step is only skipped once every backing collection has loaded
//! empty.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "count")]
pub enum Availability {
    #[default]
    Pending,
    Loaded(usize),
}

impl Availability {
    /// `None` models a fetch that has not resolved yet.
    pub fn from_count(count: Option<usize>) -> Self {
        count.map_or(Self::Pending, Self::Loaded)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn has_items(self) -> bool {
        matches!(self, Self::Loaded(count) if count > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingData {
    #[serde(default)]
    pub policies: Availability,
    #[serde(default)]
    pub households: Availability,
    #[serde(default)]
    pub geographies: Availability,
    #[serde(default)]
    pub simulations: Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDecision {
    Show,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    Available,
    Unavailable,
    Loading,
}

/// Resolution for one selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepGate {
    pub decision: SkipDecision,
    pub load_existing: ChoiceState,
    /// False while the existing-data question is still open.
    pub primary_enabled: bool,
}

impl StepGate {
    /// The gate for a step already on screen: the step stays, only the
    /// load-existing choice reflects the data.
    pub fn shown(self) -> Self {
        Self {
            decision: SkipDecision::Show,
            ..self
        }
    }
}

/// Known non-empty wins over pending: one loaded collection with items is
/// enough to offer the choice even if a sibling collection is still loading.
pub fn resolve_gate(sources: &[Availability]) -> StepGate {
    if sources.iter().any(|source| source.has_items()) {
        return StepGate {
            decision: SkipDecision::Show,
            load_existing: ChoiceState::Available,
            primary_enabled: true,
        };
    }
    if sources.iter().any(|source| source.is_pending()) {
        return StepGate {
            decision: SkipDecision::Show,
            load_existing: ChoiceState::Loading,
            primary_enabled: false,
        };
    }
    StepGate {
        decision: SkipDecision::Skip,
        load_existing: ChoiceState::Unavailable,
        primary_enabled: true,
    }
}

impl ExistingData {
    pub fn all_loaded(policies: usize, households: usize, geographies: usize, simulations: usize) -> Self {
        Self {
            policies: Availability::Loaded(policies),
            households: Availability::Loaded(households),
            geographies: Availability::Loaded(geographies),
            simulations: Availability::Loaded(simulations),
        }
    }

    pub fn policy_gate(&self) -> StepGate {
        resolve_gate(&[self.policies])
    }

    pub fn population_gate(&self) -> StepGate {
        resolve_gate(&[self.households, self.geographies])
    }

    pub fn simulation_gate(&self) -> StepGate {
        resolve_gate(&[self.simulations])
    }
}
