#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    #[error("{field} label must not be empty")]
    EmptyLabel { field: &'static str },
    #[error("year `{year}` is not a four-digit calendar year")]
    InvalidYear { year: String },
    #[error("{what} id must not be empty")]
    MissingId { what: &'static str },
    #[error("{index} simulation has no population to copy")]
    MissingPopulation { index: &'static str },
}
