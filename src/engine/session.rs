use super::error::NavError;
use super::intent::{reduce, NavIntent};
use super::state::{NavigationSnapshot, NavigationState};
use crate::flow::{Flow, FlowCatalog, Frame, TransitionTarget};
use crate::shared::ids::{FlowKey, FrameKey, RETURN_SENTINEL};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    UnknownEvent {
        event: String,
        valid_events: Vec<String>,
    },
    StackUnderflow,
    /// Only produced when the session is lenient; strict sessions return the
    /// error instead.
    ConfigurationError(NavError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Transitioned { target: TransitionTarget },
    Ignored(IgnoredReason),
}

impl DispatchOutcome {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentFlowContext {
    pub parent_flow: FlowKey,
    pub parent_frame: FrameKey,
}

/// What a step renderer receives for the active frame.
#[derive(Debug, Clone)]
pub struct FrameContext<'a> {
    pub flow: &'a Flow,
    pub frame: &'a Frame,
    pub is_in_subflow: bool,
    pub flow_depth: usize,
    pub parent_flow_context: Option<ParentFlowContext>,
}

/// One wizard session: owns its navigation state, shares the catalog.
#[derive(Debug, Clone)]
pub struct FlowSession {
    catalog: Arc<FlowCatalog>,
    state: NavigationState,
    strict: bool,
}

impl FlowSession {
    pub fn new(catalog: Arc<FlowCatalog>) -> Self {
        Self {
            catalog,
            state: NavigationState::new(),
            strict: true,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.state.snapshot()
    }

    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    /// Enters a top-level flow, discarding any previous navigation.
    pub fn start(&mut self, flow_key: &str) -> Result<DispatchOutcome, NavError> {
        let flow = match self.lookup_flow(flow_key) {
            Ok(flow) => flow,
            Err(err) => return self.degrade(err),
        };
        let target = TransitionTarget::FlowRef(flow.key().clone());
        self.apply(NavIntent::SetFlow(flow))?;
        tracing::info!(flow = flow_key, "wizard started");
        Ok(DispatchOutcome::Transitioned { target })
    }

    /// Looks up `event` on the active frame and applies its target.
    pub fn fire(&mut self, event: &str) -> Result<DispatchOutcome, NavError> {
        let frame = self.state.current_frame_def().ok_or(NavError::NoActiveFlow)?;
        let Some(target) = frame.target(event).cloned() else {
            let valid_events = frame.events();
            tracing::warn!(
                frame = %frame.key(),
                event,
                valid_events = %valid_events.join(","),
                "unknown event ignored"
            );
            return Ok(DispatchOutcome::Ignored(IgnoredReason::UnknownEvent {
                event: event.to_string(),
                valid_events,
            }));
        };
        self.apply_target(event, target)
    }

    /// Shorthand for firing the return sentinel from the active frame.
    pub fn on_return(&mut self) -> Result<DispatchOutcome, NavError> {
        if self.state.current_flow.is_none() {
            return Err(NavError::NoActiveFlow);
        }
        self.apply_target(RETURN_SENTINEL, TransitionTarget::ReturnSentinel)
    }

    /// Linear back within the current flow. Returns whether the frame moved.
    pub fn go_back(&mut self) -> bool {
        if self.state.frame_history.is_empty() {
            return false;
        }
        self.state = self.state.navigate_to_previous_frame();
        tracing::debug!(frame = ?self.state.current_frame.as_ref().map(FrameKey::as_str), "went back");
        true
    }

    /// Abandons the active sub-flow and resumes the parent where it was left.
    pub fn cancel_subflow(&mut self) -> DispatchOutcome {
        if self.state.depth() == 0 {
            tracing::warn!("cancel requested at top level; nothing to return to");
            return DispatchOutcome::Ignored(IgnoredReason::StackUnderflow);
        }
        self.state = self.state.return_from_flow(false);
        tracing::debug!(depth = self.state.depth(), "sub-flow cancelled");
        DispatchOutcome::Transitioned {
            target: TransitionTarget::ReturnSentinel,
        }
    }

    pub fn clear(&mut self) {
        self.state = self.state.clear();
        tracing::debug!("navigation cleared");
    }

    /// Resolves `event` without applying it.
    pub fn peek(&self, event: &str) -> Result<&TransitionTarget, NavError> {
        let frame = self.state.current_frame_def().ok_or(NavError::NoActiveFlow)?;
        frame.target(event).ok_or_else(|| NavError::UnknownEvent {
            frame: frame.key().to_string(),
            event: event.to_string(),
            valid_events: frame.events(),
        })
    }

    pub fn frame_context(&self) -> Option<FrameContext<'_>> {
        let flow = self.state.current_flow.as_deref()?;
        let frame = self.state.current_frame_def()?;
        let parent_flow_context = self.state.flow_stack.last().map(|entry| ParentFlowContext {
            parent_flow: entry.suspended_flow.key().clone(),
            parent_frame: entry.resume_frame().clone(),
        });
        Some(FrameContext {
            flow,
            frame,
            is_in_subflow: self.state.is_in_subflow(),
            flow_depth: self.state.depth(),
            parent_flow_context,
        })
    }

    fn apply_target(
        &mut self,
        event: &str,
        target: TransitionTarget,
    ) -> Result<DispatchOutcome, NavError> {
        let intent = match &target {
            TransitionTarget::FrameRef(frame) => Ok(NavIntent::NavigateToFrame(frame.clone())),
            TransitionTarget::FlowRef(flow) => self.lookup_flow(flow.as_str()).map(NavIntent::SwapFlow),
            TransitionTarget::SubFlowEntry { flow, return_to } => {
                self.lookup_flow(flow.as_str()).map(|flow| NavIntent::NavigateToFlow {
                    flow,
                    return_to: return_to.clone(),
                })
            }
            TransitionTarget::ReturnSentinel => {
                if self.state.depth() == 0 {
                    tracing::warn!(event, "return at top level ignored; flow stack is empty");
                    return Ok(DispatchOutcome::Ignored(IgnoredReason::StackUnderflow));
                }
                Ok(NavIntent::ReturnFromFlow {
                    use_return_target: true,
                })
            }
        };

        match intent.and_then(|intent| self.apply(intent)) {
            Ok(()) => {
                tracing::debug!(
                    event,
                    target = %target,
                    flow = ?self.state.current_flow.as_ref().map(|flow| flow.key().to_string()),
                    frame = ?self.state.current_frame.as_ref().map(FrameKey::as_str),
                    depth = self.state.depth(),
                    "transition applied"
                );
                Ok(DispatchOutcome::Transitioned { target })
            }
            Err(err) => self.degrade(err),
        }
    }

    fn apply(&mut self, intent: NavIntent) -> Result<(), NavError> {
        self.state = reduce(&self.state, intent)?;
        Ok(())
    }

    fn lookup_flow(&self, key: &str) -> Result<Arc<Flow>, NavError> {
        self.catalog
            .get(key)
            .cloned()
            .ok_or_else(|| NavError::UnknownFlow {
                flow: key.to_string(),
            })
    }

    fn degrade(&self, err: NavError) -> Result<DispatchOutcome, NavError> {
        if self.strict || !err.is_configuration_error() {
            return Err(err);
        }
        tracing::error!(error = %err, "configuration error degraded to no-op");
        Ok(DispatchOutcome::Ignored(IgnoredReason::ConfigurationError(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FlowSession {
        FlowSession::new(Arc::new(FlowCatalog::builtin().expect("builtin catalog")))
    }

    #[test]
    fn start_unknown_flow_is_loud_when_strict() {
        let mut session = session();
        let err = session.start("ghost").expect_err("unknown flow");
        assert_eq!(
            err,
            NavError::UnknownFlow {
                flow: "ghost".to_string()
            }
        );
    }

    #[test]
    fn start_unknown_flow_degrades_when_lenient() {
        let mut session = session().with_strict(false);
        let outcome = session.start("ghost").expect("lenient");
        assert!(matches!(
            outcome,
            DispatchOutcome::Ignored(IgnoredReason::ConfigurationError(NavError::UnknownFlow { .. }))
        ));
        assert!(session.state().current_flow.is_none());
    }

    #[test]
    fn unknown_event_reports_valid_events() {
        let mut session = session();
        session.start("policy_creation").expect("start");
        let outcome = session.fire("jump").expect("fire");
        assert_eq!(
            outcome,
            DispatchOutcome::Ignored(IgnoredReason::UnknownEvent {
                event: "jump".to_string(),
                valid_events: vec!["cancel".to_string(), "next".to_string()],
            })
        );
        assert_eq!(session.snapshot().current_frame.as_deref(), Some("label"));
    }

    #[test]
    fn fire_without_flow_is_an_error() {
        let mut session = session();
        assert_eq!(session.fire("next"), Err(NavError::NoActiveFlow));
    }

    #[test]
    fn flow_ref_swaps_without_stacking() {
        let mut session = session();
        session.start("policy_view").expect("start");
        let outcome = session.fire("create_new").expect("fire");
        assert!(outcome.is_transition());
        assert_eq!(session.depth(), 0);
        assert_eq!(
            session.snapshot().current_flow.as_deref(),
            Some("policy_creation")
        );
    }

    #[test]
    fn frame_context_points_at_parent_resume_frame() {
        let mut session = session();
        session.start("simulation_creation").expect("start");
        session.fire("next").expect("to setup");
        session.fire("setup_policy").expect("to setup_policy");
        session.fire("create_new").expect("enter policy creation");

        let context = session.frame_context().expect("context");
        assert!(context.is_in_subflow);
        assert_eq!(context.flow_depth, 1);
        assert_eq!(context.flow.key().as_str(), "policy_creation");
        let parent = context.parent_flow_context.expect("parent");
        assert_eq!(parent.parent_flow.as_str(), "simulation_creation");
        assert_eq!(parent.parent_frame.as_str(), "setup");
    }

    #[test]
    fn peek_does_not_move() {
        let mut session = session();
        session.start("policy_creation").expect("start");
        let target = session.peek("next").expect("peek").clone();
        assert_eq!(target, TransitionTarget::frame("parameters").unwrap());
        assert_eq!(session.snapshot().current_frame.as_deref(), Some("label"));
        assert!(matches!(
            session.peek("nope"),
            Err(NavError::UnknownEvent { .. })
        ));
    }

    #[test]
    fn cancel_at_top_level_is_underflow() {
        let mut session = session();
        session.start("report_creation").expect("start");
        assert_eq!(
            session.cancel_subflow(),
            DispatchOutcome::Ignored(IgnoredReason::StackUnderflow)
        );
    }
}
