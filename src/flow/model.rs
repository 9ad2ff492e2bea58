use super::component::ComponentKey;
use super::error::FlowDefinitionError;
use super::target::TransitionTarget;
use crate::shared::ids::{FlowKey, FrameKey};
use std::collections::BTreeMap;

/// One step of a wizard: what to render and where each event leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    key: FrameKey,
    component: ComponentKey,
    on: BTreeMap<String, TransitionTarget>,
}

impl Frame {
    pub fn new(key: FrameKey, component: ComponentKey) -> Self {
        Self {
            key,
            component,
            on: BTreeMap::new(),
        }
    }

    pub fn on(mut self, event: &str, target: TransitionTarget) -> Self {
        self.on.insert(event.to_string(), target);
        self
    }

    pub fn key(&self) -> &FrameKey {
        &self.key
    }

    pub fn component(&self) -> ComponentKey {
        self.component
    }

    pub fn target(&self, event: &str) -> Option<&TransitionTarget> {
        self.on.get(event)
    }

    pub fn transitions(&self) -> &BTreeMap<String, TransitionTarget> {
        &self.on
    }

    pub fn events(&self) -> Vec<String> {
        self.on.keys().cloned().collect()
    }
}

/// A named graph of frames with one initial frame. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    key: FlowKey,
    initial_frame: FrameKey,
    frames: BTreeMap<FrameKey, Frame>,
}

impl Flow {
    pub fn new(
        key: FlowKey,
        initial_frame: FrameKey,
        frames: impl IntoIterator<Item = Frame>,
    ) -> Result<Self, FlowDefinitionError> {
        let frames: BTreeMap<FrameKey, Frame> = frames
            .into_iter()
            .map(|frame| (frame.key.clone(), frame))
            .collect();
        let flow = Self {
            key,
            initial_frame,
            frames,
        };
        flow.validate()?;
        Ok(flow)
    }

    fn validate(&self) -> Result<(), FlowDefinitionError> {
        if self.frames.is_empty() {
            return Err(FlowDefinitionError::EmptyFlow {
                flow: self.key.to_string(),
            });
        }
        if !self.frames.contains_key(&self.initial_frame) {
            return Err(FlowDefinitionError::MissingInitialFrame {
                flow: self.key.to_string(),
                frame: self.initial_frame.to_string(),
            });
        }
        for frame in self.frames.values() {
            for (event, target) in &frame.on {
                let local = match target {
                    TransitionTarget::FrameRef(target) => Some(target),
                    TransitionTarget::SubFlowEntry {
                        return_to: Some(target),
                        ..
                    } => Some(target),
                    _ => None,
                };
                if let Some(target) = local {
                    if !self.frames.contains_key(target) {
                        return Err(FlowDefinitionError::UnknownFrameTarget {
                            flow: self.key.to_string(),
                            frame: frame.key.to_string(),
                            event: event.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn key(&self) -> &FlowKey {
        &self.key
    }

    pub fn initial_frame(&self) -> &FrameKey {
        &self.initial_frame
    }

    pub fn frame(&self, key: &str) -> Option<&Frame> {
        self.frames.get(key)
    }

    pub fn contains_frame(&self, key: &str) -> bool {
        self.frames.contains_key(key)
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    /// Flow keys this flow can reach through `FlowRef` or `SubFlowEntry`.
    pub fn referenced_flows(&self) -> Vec<(&Frame, &str, &FlowKey)> {
        let mut refs = Vec::new();
        for frame in self.frames.values() {
            for (event, target) in &frame.on {
                match target {
                    TransitionTarget::FlowRef(flow) | TransitionTarget::SubFlowEntry { flow, .. } => {
                        refs.push((frame, event.as_str(), flow));
                    }
                    TransitionTarget::FrameRef(_) | TransitionTarget::ReturnSentinel => {}
                }
            }
        }
        refs
    }
}
