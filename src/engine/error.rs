#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("no flow is active")]
    NoActiveFlow,
    #[error("frame `{frame}` is not defined in flow `{flow}`")]
    UnknownFrame { flow: String, frame: String },
    #[error("flow `{flow}` is not defined in the catalog")]
    UnknownFlow { flow: String },
    #[error("event `{event}` is not mapped for frame `{frame}`; valid events: {}", valid_events.join(", "))]
    UnknownEvent {
        frame: String,
        event: String,
        valid_events: Vec<String>,
    },
}

impl NavError {
    /// Configuration-class errors point at a malformed flow definition rather
    /// than at a user action.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnknownFrame { .. } | Self::UnknownFlow { .. })
    }
}
