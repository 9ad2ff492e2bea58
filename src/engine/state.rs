//! Navigation state for the flow engine.
//!
//! Every operation takes `&self` and returns the next state. Flows are shared
//! through `Arc`, so suspended stack entries cost a pointer copy.

use super::error::NavError;
use crate::flow::{Flow, Frame};
use crate::shared::ids::FrameKey;
use serde::Serialize;
use std::sync::Arc;

/// A parent context suspended while a sub-flow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    pub suspended_flow: Arc<Flow>,
    pub suspended_frame: FrameKey,
    pub return_to: Option<FrameKey>,
    pub suspended_history: Vec<FrameKey>,
}

impl StackEntry {
    /// Frame the parent resumes at when the sub-flow completes.
    pub fn resume_frame(&self) -> &FrameKey {
        self.return_to.as_ref().unwrap_or(&self.suspended_frame)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_flow: Option<Arc<Flow>>,
    pub current_frame: Option<FrameKey>,
    pub flow_stack: Vec<StackEntry>,
    pub frame_history: Vec<FrameKey>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full reset onto a top-level flow.
    pub fn set_flow(&self, flow: Arc<Flow>) -> Self {
        let frame = flow.initial_frame().clone();
        Self {
            current_flow: Some(flow),
            current_frame: Some(frame),
            flow_stack: Vec::new(),
            frame_history: Vec::new(),
        }
    }

    /// Same-level swap: the stack is kept, history starts over.
    pub fn swap_flow(&self, flow: Arc<Flow>) -> Self {
        let frame = flow.initial_frame().clone();
        Self {
            current_flow: Some(flow),
            current_frame: Some(frame),
            flow_stack: self.flow_stack.clone(),
            frame_history: Vec::new(),
        }
    }

    pub fn navigate_to_frame(&self, frame: &FrameKey) -> Result<Self, NavError> {
        let flow = self.current_flow.as_ref().ok_or(NavError::NoActiveFlow)?;
        if !flow.contains_frame(frame.as_str()) {
            return Err(NavError::UnknownFrame {
                flow: flow.key().to_string(),
                frame: frame.to_string(),
            });
        }
        let mut frame_history = self.frame_history.clone();
        if let Some(current) = &self.current_frame {
            frame_history.push(current.clone());
        }
        Ok(Self {
            current_flow: Some(Arc::clone(flow)),
            current_frame: Some(frame.clone()),
            flow_stack: self.flow_stack.clone(),
            frame_history,
        })
    }

    /// Suspends the active flow (if any) and enters `sub_flow` at its initial
    /// frame. The only operation that grows the stack.
    pub fn navigate_to_flow(
        &self,
        sub_flow: Arc<Flow>,
        return_to: Option<FrameKey>,
    ) -> Result<Self, NavError> {
        let mut flow_stack = self.flow_stack.clone();
        if let (Some(flow), Some(frame)) = (&self.current_flow, &self.current_frame) {
            if let Some(target) = &return_to {
                if !flow.contains_frame(target.as_str()) {
                    return Err(NavError::UnknownFrame {
                        flow: flow.key().to_string(),
                        frame: target.to_string(),
                    });
                }
            }
            flow_stack.push(StackEntry {
                suspended_flow: Arc::clone(flow),
                suspended_frame: frame.clone(),
                return_to,
                suspended_history: self.frame_history.clone(),
            });
        }
        let frame = sub_flow.initial_frame().clone();
        Ok(Self {
            current_flow: Some(sub_flow),
            current_frame: Some(frame),
            flow_stack,
            frame_history: Vec::new(),
        })
    }

    /// Pops the innermost suspended parent. `use_return_target` separates a
    /// completed sub-flow (resume at the continuation frame) from a cancelled
    /// one (resume where the user left). An empty stack leaves the state
    /// unchanged.
    pub fn return_from_flow(&self, use_return_target: bool) -> Self {
        let mut flow_stack = self.flow_stack.clone();
        let Some(entry) = flow_stack.pop() else {
            return self.clone();
        };
        let frame = match (use_return_target, entry.return_to) {
            (true, Some(target)) => target,
            _ => entry.suspended_frame,
        };
        Self {
            current_flow: Some(entry.suspended_flow),
            current_frame: Some(frame),
            flow_stack,
            frame_history: entry.suspended_history,
        }
    }

    pub fn navigate_to_previous_frame(&self) -> Self {
        let mut next = self.clone();
        if let Some(previous) = next.frame_history.pop() {
            next.current_frame = Some(previous);
        }
        next
    }

    pub fn clear(&self) -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.flow_stack.len()
    }

    pub fn is_in_subflow(&self) -> bool {
        !self.flow_stack.is_empty()
    }

    pub fn current_frame_def(&self) -> Option<&Frame> {
        let flow = self.current_flow.as_ref()?;
        let frame = self.current_frame.as_ref()?;
        flow.frame(frame.as_str())
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_flow: self
                .current_flow
                .as_ref()
                .map(|flow| flow.key().to_string()),
            current_frame: self.current_frame.as_ref().map(ToString::to_string),
            flow_stack: self
                .flow_stack
                .iter()
                .map(|entry| StackEntrySnapshot {
                    flow: entry.suspended_flow.key().to_string(),
                    frame: entry.suspended_frame.to_string(),
                    return_to: entry.return_to.as_ref().map(ToString::to_string),
                    history: entry.suspended_history.iter().map(ToString::to_string).collect(),
                })
                .collect(),
            frame_history: self.frame_history.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Key-only view of a `NavigationState`, for logs and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationSnapshot {
    pub current_flow: Option<String>,
    pub current_frame: Option<String>,
    pub flow_stack: Vec<StackEntrySnapshot>,
    pub frame_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackEntrySnapshot {
    pub flow: String,
    pub frame: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
    pub history: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{ComponentKey, TransitionTarget};
    use crate::shared::ids::FlowKey;

    fn key(raw: &str) -> FrameKey {
        FrameKey::parse(raw).unwrap()
    }

    fn linear_flow(name: &str, frames: &[&str]) -> Arc<Flow> {
        let built = frames.iter().enumerate().map(|(idx, frame)| {
            let base = Frame::new(key(frame), ComponentKey::SimulationSetup);
            match frames.get(idx + 1) {
                Some(next) => base.on("next", TransitionTarget::frame(next).unwrap()),
                None => base.on("next", TransitionTarget::ReturnSentinel),
            }
        });
        Arc::new(Flow::new(FlowKey::parse(name).unwrap(), key(frames[0]), built).unwrap())
    }

    #[test]
    fn set_flow_resets_everything() {
        let outer = linear_flow("outer", &["o1", "o2"]);
        let inner = linear_flow("inner", &["i1"]);
        let state = NavigationState::new()
            .set_flow(Arc::clone(&outer))
            .navigate_to_frame(&key("o2"))
            .unwrap()
            .navigate_to_flow(inner, None)
            .unwrap();
        assert_eq!(state.depth(), 1);

        let reset = state.set_flow(Arc::clone(&outer));
        assert_eq!(reset.current_frame, Some(key("o1")));
        assert!(reset.flow_stack.is_empty());
        assert!(reset.frame_history.is_empty());
    }

    #[test]
    fn navigate_to_frame_records_history() {
        let flow = linear_flow("outer", &["a", "b", "c"]);
        let state = NavigationState::new()
            .set_flow(flow)
            .navigate_to_frame(&key("b"))
            .unwrap()
            .navigate_to_frame(&key("c"))
            .unwrap();
        assert_eq!(state.frame_history, vec![key("a"), key("b")]);
        assert_eq!(state.current_frame, Some(key("c")));
    }

    #[test]
    fn navigate_to_frame_rejects_unknown_frame_and_keeps_state() {
        let state = NavigationState::new().set_flow(linear_flow("outer", &["a"]));
        let err = state.navigate_to_frame(&key("zzz")).expect_err("unknown frame");
        assert_eq!(
            err,
            NavError::UnknownFrame {
                flow: "outer".to_string(),
                frame: "zzz".to_string()
            }
        );
        assert_eq!(state.current_frame, Some(key("a")));
    }

    #[test]
    fn navigate_to_frame_without_flow_is_an_error() {
        let err = NavigationState::new()
            .navigate_to_frame(&key("a"))
            .expect_err("no flow");
        assert_eq!(err, NavError::NoActiveFlow);
    }

    #[test]
    fn navigate_to_flow_without_active_flow_does_not_stack() {
        let state = NavigationState::new()
            .navigate_to_flow(linear_flow("inner", &["i1"]), None)
            .unwrap();
        assert_eq!(state.depth(), 0);
        assert_eq!(state.current_frame, Some(key("i1")));
    }

    #[test]
    fn navigate_to_flow_rejects_return_target_outside_parent() {
        let state = NavigationState::new().set_flow(linear_flow("outer", &["o1"]));
        let err = state
            .navigate_to_flow(linear_flow("inner", &["i1"]), Some(key("ghost")))
            .expect_err("bad return target");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn previous_frame_pops_history_and_is_noop_when_empty() {
        let state = NavigationState::new()
            .set_flow(linear_flow("outer", &["a", "b"]))
            .navigate_to_frame(&key("b"))
            .unwrap();
        let back = state.navigate_to_previous_frame();
        assert_eq!(back.current_frame, Some(key("a")));
        assert!(back.frame_history.is_empty());
        assert_eq!(back.navigate_to_previous_frame(), back);
    }

    #[test]
    fn swap_flow_keeps_stack_and_resets_history() {
        let state = NavigationState::new()
            .set_flow(linear_flow("outer", &["o1"]))
            .navigate_to_flow(linear_flow("inner", &["i1", "i2"]), None)
            .unwrap()
            .navigate_to_frame(&key("i2"))
            .unwrap();
        let swapped = state.swap_flow(linear_flow("other", &["x1"]));
        assert_eq!(swapped.depth(), 1);
        assert_eq!(swapped.current_frame, Some(key("x1")));
        assert!(swapped.frame_history.is_empty());
    }

    #[test]
    fn clear_empties_state() {
        let state = NavigationState::new().set_flow(linear_flow("outer", &["a"]));
        assert_eq!(state.clear(), NavigationState::default());
    }

    #[test]
    fn snapshot_lists_keys_only() {
        let state = NavigationState::new()
            .set_flow(linear_flow("outer", &["o1", "o2"]))
            .navigate_to_frame(&key("o2"))
            .unwrap()
            .navigate_to_flow(linear_flow("inner", &["i1"]), Some(key("o1")))
            .unwrap();
        let json = serde_json::to_value(state.snapshot()).expect("serialize snapshot");
        assert_eq!(json["current_flow"], "inner");
        assert_eq!(json["flow_stack"][0]["frame"], "o2");
        assert_eq!(json["flow_stack"][0]["return_to"], "o1");
        assert_eq!(json["flow_stack"][0]["history"][0], "o1");
    }
}
