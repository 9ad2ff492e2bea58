use super::error::NavError;
use super::state::NavigationState;
use crate::flow::Flow;
use crate::shared::ids::FrameKey;
use std::sync::Arc;

/// One navigation request, applied in dispatch order by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    SetFlow(Arc<Flow>),
    SwapFlow(Arc<Flow>),
    NavigateToFrame(FrameKey),
    NavigateToFlow {
        flow: Arc<Flow>,
        return_to: Option<FrameKey>,
    },
    ReturnFromFlow {
        use_return_target: bool,
    },
    NavigateToPreviousFrame,
    Clear,
}

impl NavIntent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFlow(_) => "set_flow",
            Self::SwapFlow(_) => "swap_flow",
            Self::NavigateToFrame(_) => "navigate_to_frame",
            Self::NavigateToFlow { .. } => "navigate_to_flow",
            Self::ReturnFromFlow { .. } => "return_from_flow",
            Self::NavigateToPreviousFrame => "navigate_to_previous_frame",
            Self::Clear => "clear",
        }
    }
}

pub fn reduce(state: &NavigationState, intent: NavIntent) -> Result<NavigationState, NavError> {
    match intent {
        NavIntent::SetFlow(flow) => Ok(state.set_flow(flow)),
        NavIntent::SwapFlow(flow) => Ok(state.swap_flow(flow)),
        NavIntent::NavigateToFrame(frame) => state.navigate_to_frame(&frame),
        NavIntent::NavigateToFlow { flow, return_to } => state.navigate_to_flow(flow, return_to),
        NavIntent::ReturnFromFlow { use_return_target } => {
            Ok(state.return_from_flow(use_return_target))
        }
        NavIntent::NavigateToPreviousFrame => Ok(state.navigate_to_previous_frame()),
        NavIntent::Clear => Ok(state.clear()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{ComponentKey, Frame, TransitionTarget};
    use crate::shared::ids::FlowKey;

    fn two_frame_flow() -> Arc<Flow> {
        let a = FrameKey::parse("a").unwrap();
        let b = FrameKey::parse("b").unwrap();
        Arc::new(
            Flow::new(
                FlowKey::parse("pair").unwrap(),
                a.clone(),
                [
                    Frame::new(a, ComponentKey::PolicyLabel)
                        .on("next", TransitionTarget::frame("b").unwrap()),
                    Frame::new(b, ComponentKey::PolicySubmit)
                        .on("next", TransitionTarget::ReturnSentinel),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn reduce_applies_intents_in_order() {
        let intents = vec![
            NavIntent::SetFlow(two_frame_flow()),
            NavIntent::NavigateToFrame(FrameKey::parse("b").unwrap()),
            NavIntent::NavigateToPreviousFrame,
        ];
        let state = intents
            .into_iter()
            .try_fold(NavigationState::new(), |state, intent| reduce(&state, intent))
            .expect("reduce");
        assert_eq!(state.current_frame, Some(FrameKey::parse("a").unwrap()));
        assert!(state.frame_history.is_empty());
    }

    #[test]
    fn reduce_return_on_empty_stack_is_noop() {
        let state = NavigationState::new().set_flow(two_frame_flow());
        let next = reduce(
            &state,
            NavIntent::ReturnFromFlow {
                use_return_target: true,
            },
        )
        .expect("underflow is not an error");
        assert_eq!(next, state);
    }

    #[test]
    fn reduce_surfaces_unknown_frame() {
        let state = NavigationState::new().set_flow(two_frame_flow());
        let err = reduce(
            &state,
            NavIntent::NavigateToFrame(FrameKey::parse("missing").unwrap()),
        )
        .expect_err("unknown frame");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn reduce_clear_drops_flow() {
        let state = NavigationState::new().set_flow(two_frame_flow());
        let cleared = reduce(&state, NavIntent::Clear).expect("clear");
        assert!(cleared.current_flow.is_none());
        assert_eq!(NavIntent::Clear.name(), "clear");
    }
}
