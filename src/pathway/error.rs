use crate::callbacks::CallbackError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathwayError {
    #[error("country `{country_id}` is not supported")]
    UnsupportedCountry { country_id: String },
    #[error("cannot submit report: no baseline simulation")]
    MissingBaselineSimulation,
    #[error("{index} simulation is not fully configured")]
    IncompleteSimulation { index: &'static str },
    #[error("`{action}` is not available from the `{mode}` step")]
    WrongStep {
        action: &'static str,
        mode: &'static str,
    },
    #[error("{what} is still loading")]
    StillLoading { what: &'static str },
    #[error("there are no saved {what} to load")]
    NothingToLoad { what: &'static str },
    #[error("cannot {action}: population is locked to the other simulation")]
    PopulationLocked { action: &'static str },
    #[error("simulation uses population `{found}` but the report is locked to `{expected}`")]
    IncompatiblePopulation { expected: String, found: String },
    #[error(transparent)]
    Callback(#[from] CallbackError),
}
