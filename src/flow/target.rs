use crate::shared::ids::{FlowKey, FrameKey, RETURN_SENTINEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where an event leads. Classified once, when the flow is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionTarget {
    /// Move within the same flow.
    FrameRef(FrameKey),
    /// Replace the current flow outright, no stacking.
    FlowRef(FlowKey),
    /// Suspend the current flow and enter another one.
    SubFlowEntry {
        flow: FlowKey,
        return_to: Option<FrameKey>,
    },
    /// End the current (sub-)flow.
    ReturnSentinel,
}

impl TransitionTarget {
    pub fn frame(key: &str) -> Result<Self, String> {
        Ok(Self::FrameRef(FrameKey::parse(key)?))
    }

    pub fn flow(key: &str) -> Result<Self, String> {
        Ok(Self::FlowRef(FlowKey::parse(key)?))
    }

    pub fn sub_flow(flow: &str, return_to: Option<&str>) -> Result<Self, String> {
        Ok(Self::SubFlowEntry {
            flow: FlowKey::parse(flow)?,
            return_to: return_to.map(FrameKey::parse).transpose()?,
        })
    }

    pub fn to_raw(&self) -> RawTarget {
        match self {
            Self::FrameRef(frame) => RawTarget::Name(frame.to_string()),
            Self::FlowRef(flow) => RawTarget::Name(flow.to_string()),
            Self::SubFlowEntry { flow, return_to } => RawTarget::SubFlow {
                flow: flow.to_string(),
                return_to: return_to.as_ref().map(ToString::to_string),
            },
            Self::ReturnSentinel => RawTarget::Name(RETURN_SENTINEL.to_string()),
        }
    }
}

impl std::fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrameRef(frame) => write!(f, "frame:{frame}"),
            Self::FlowRef(flow) => write!(f, "flow:{flow}"),
            Self::SubFlowEntry {
                flow,
                return_to: Some(frame),
            } => write!(f, "subflow:{flow}->{frame}"),
            Self::SubFlowEntry {
                flow,
                return_to: None,
            } => write!(f, "subflow:{flow}"),
            Self::ReturnSentinel => f.write_str(RETURN_SENTINEL),
        }
    }
}

/// Target as written in a catalog file: a bare name or a `{flow, return_to}`
/// object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawTarget {
    Name(String),
    SubFlow {
        flow: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_to: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    InvalidKey(String),
    Ambiguous(String),
}

/// Classifies a raw target. `flow_keys` holds every flow of the catalog and
/// `frame_keys` the frames of the owning flow; a bare name present in both is
/// ambiguous.
pub fn classify_target(
    raw: &RawTarget,
    flow_keys: &BTreeSet<FlowKey>,
    frame_keys: &BTreeSet<FrameKey>,
) -> Result<TransitionTarget, ClassifyError> {
    match raw {
        RawTarget::Name(name) if name == RETURN_SENTINEL => Ok(TransitionTarget::ReturnSentinel),
        RawTarget::Name(name) => {
            let names_flow = flow_keys.contains(name.as_str());
            let names_frame = frame_keys.contains(name.as_str());
            match (names_flow, names_frame) {
                (true, true) => Err(ClassifyError::Ambiguous(name.clone())),
                (true, false) => FlowKey::parse(name)
                    .map(TransitionTarget::FlowRef)
                    .map_err(ClassifyError::InvalidKey),
                _ => FrameKey::parse(name)
                    .map(TransitionTarget::FrameRef)
                    .map_err(ClassifyError::InvalidKey),
            }
        }
        RawTarget::SubFlow { flow, return_to } => {
            TransitionTarget::sub_flow(flow, return_to.as_deref()).map_err(ClassifyError::InvalidKey)
        }
    }
}
