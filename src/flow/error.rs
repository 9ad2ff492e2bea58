#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowDefinitionError {
    #[error("flow `{flow}` initial frame `{frame}` is not defined")]
    MissingInitialFrame { flow: String, frame: String },
    #[error("flow `{flow}` frame `{frame}` event `{event}` targets unknown frame `{target}`")]
    UnknownFrameTarget {
        flow: String,
        frame: String,
        event: String,
        target: String,
    },
    #[error("flow `{flow}` frame `{frame}` event `{event}` targets unknown flow `{target}`")]
    UnknownFlowTarget {
        flow: String,
        frame: String,
        event: String,
        target: String,
    },
    #[error(
        "flow `{flow}` frame `{frame}` event `{event}` target `{target}` names both a frame and a flow"
    )]
    AmbiguousTarget {
        flow: String,
        frame: String,
        event: String,
        target: String,
    },
    #[error("flow `{flow}` frame `{frame}` is declared under key `{declared}`")]
    FrameKeyMismatch {
        flow: String,
        frame: String,
        declared: String,
    },
    #[error("flow `{flow}` has no frames")]
    EmptyFlow { flow: String },
    #[error("invalid key in flow `{flow}`: {reason}")]
    InvalidKey { flow: String, reason: String },
}
