use crate::engine::{DispatchOutcome, FlowSession, IgnoredReason, NavError};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "POLICYFLOW_SCRIPT_KEYS";

const WIZARD_STATUS_TEXT: &str = "Enter fires the selected event. q quits.";
const WIZARD_HINT_TEXT: &str = "Up/Down move | Enter fire | Esc back | x leave sub-flow | q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    MovePrev,
    MoveNext,
    Fire,
    Back,
    CancelSubflow,
    Quit,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MovePrev => "move_prev",
            Self::MoveNext => "move_next",
            Self::Fire => "fire",
            Self::Back => "back",
            Self::CancelSubflow => "cancel_subflow",
            Self::Quit => "quit",
        }
    }
}

pub fn wizard_action_from_key(key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(WizardAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(WizardAction::MovePrev),
        KeyCode::Down | KeyCode::Char('j') => Some(WizardAction::MoveNext),
        KeyCode::Enter => Some(WizardAction::Fire),
        KeyCode::Esc | KeyCode::Backspace => Some(WizardAction::Back),
        KeyCode::Char('x') => Some(WizardAction::CancelSubflow),
        KeyCode::Char('q') => Some(WizardAction::Quit),
        _ => None,
    }
}

pub fn parse_scripted_wizard_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "x" => KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
            "q" => KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,enter,esc,ctrl-c,x,q"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardNavState {
    pub selected: usize,
    pub status_text: String,
    pub hint_text: String,
}

impl WizardNavState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            status_text: WIZARD_STATUS_TEXT.to_string(),
            hint_text: WIZARD_HINT_TEXT.to_string(),
        }
    }

    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

impl Default for WizardNavState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEffect {
    None,
    /// A return event fired with nothing left on the flow stack.
    Completed,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub effect: WizardEffect,
    pub feedback: Option<String>,
}

impl WizardTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: WizardEffect::None,
            feedback,
        }
    }
}

pub fn wizard_transition(
    state: &mut WizardNavState,
    session: &mut FlowSession,
    action: WizardAction,
) -> Result<WizardTransition, NavError> {
    let events = session
        .state()
        .current_frame_def()
        .map(|frame| frame.events())
        .ok_or(NavError::NoActiveFlow)?;
    state.clamp_selection(events.len());

    match action {
        WizardAction::MovePrev => {
            state.selected = state.selected.saturating_sub(1);
            Ok(WizardTransition::no_op(None))
        }
        WizardAction::MoveNext => {
            let max_index = events.len().saturating_sub(1);
            state.selected = std::cmp::min(state.selected + 1, max_index);
            Ok(WizardTransition::no_op(None))
        }
        WizardAction::Fire => {
            let Some(event) = events.get(state.selected) else {
                return Ok(WizardTransition::no_op(Some(
                    "This frame has no events.".to_string(),
                )));
            };
            match session.fire(event)? {
                DispatchOutcome::Transitioned { target } => {
                    state.selected = 0;
                    Ok(WizardTransition::no_op(Some(format!("{event} -> {target}"))))
                }
                DispatchOutcome::Ignored(IgnoredReason::StackUnderflow) => Ok(WizardTransition {
                    effect: WizardEffect::Completed,
                    feedback: Some("Wizard complete.".to_string()),
                }),
                DispatchOutcome::Ignored(IgnoredReason::UnknownEvent { valid_events, .. }) => {
                    Ok(WizardTransition::no_op(Some(format!(
                        "`{event}` is not mapped here; valid events: {}",
                        valid_events.join(", ")
                    ))))
                }
                DispatchOutcome::Ignored(IgnoredReason::ConfigurationError(err)) => {
                    Ok(WizardTransition::no_op(Some(format!("Ignored: {err}"))))
                }
            }
        }
        WizardAction::Back => {
            if session.go_back() {
                state.selected = 0;
                Ok(WizardTransition::no_op(Some("Went back.".to_string())))
            } else {
                Ok(WizardTransition::no_op(Some(
                    "Already at the first frame of this flow.".to_string(),
                )))
            }
        }
        WizardAction::CancelSubflow => match session.cancel_subflow() {
            DispatchOutcome::Transitioned { .. } => {
                state.selected = 0;
                Ok(WizardTransition::no_op(Some("Sub-flow cancelled.".to_string())))
            }
            DispatchOutcome::Ignored(_) => Ok(WizardTransition::no_op(Some(
                "Not in a sub-flow.".to_string(),
            ))),
        },
        WizardAction::Quit => Ok(WizardTransition {
            effect: WizardEffect::Quit,
            feedback: None,
        }),
    }
}
