use super::navigation::{
    parse_scripted_wizard_keys, wizard_action_from_key, wizard_transition, WizardEffect,
    WizardNavState, SCRIPT_KEYS_ENV,
};
use super::screens::{draw_wizard_ui, project_wizard_view_model};
use crate::config::Settings;
use crate::engine::{DispatchOutcome, FlowSession, NavigationSnapshot};
use crate::flow::FlowCatalog;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardExit {
    Completed,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardRunReport {
    pub flow: String,
    pub outcome: WizardExit,
    pub snapshot: NavigationSnapshot,
}

pub fn cmd_run(
    settings: &Settings,
    catalog: Arc<FlowCatalog>,
    flow_key: &str,
) -> Result<String, String> {
    let mut session = FlowSession::new(catalog).with_strict(settings.strict_transitions);
    match session.start(flow_key).map_err(|err| err.to_string())? {
        DispatchOutcome::Transitioned { .. } => {}
        DispatchOutcome::Ignored(reason) => {
            return Err(format!("flow `{flow_key}` could not be started: {reason:?}"));
        }
    }

    let exit = if let Some(keys) = load_scripted_wizard_keys()? {
        run_wizard_scripted(&mut session, keys)?
    } else if is_interactive_wizard() {
        run_wizard_tui(&mut session, &settings.country_id)?
    } else {
        return Err(format!(
            "`run` needs an interactive terminal; set {SCRIPT_KEYS_ENV} to drive it from a script"
        ));
    };

    tracing::info!(flow = flow_key, outcome = ?exit, "wizard finished");
    let report = WizardRunReport {
        flow: flow_key.to_string(),
        outcome: exit,
        snapshot: session.snapshot(),
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| format!("failed to render navigation snapshot: {e}"))
}

fn is_interactive_wizard() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_wizard_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_wizard_keys(&raw).map(Some)
}

pub fn run_wizard_scripted(
    session: &mut FlowSession,
    scripted_keys: Vec<KeyEvent>,
) -> Result<WizardExit, String> {
    let mut nav = WizardNavState::new();
    for key in scripted_keys {
        let Some(action) = wizard_action_from_key(key) else {
            continue;
        };
        let transition =
            wizard_transition(&mut nav, session, action).map_err(|err| err.to_string())?;
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        match transition.effect {
            WizardEffect::None => {}
            WizardEffect::Completed => return Ok(WizardExit::Completed),
            WizardEffect::Quit => return Ok(WizardExit::Quit),
        }
    }
    Err("scripted wizard did not terminate; end with a return event or q".to_string())
}

fn run_wizard_tui(session: &mut FlowSession, country_id: &str) -> Result<WizardExit, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let result = run_wizard_tui_loop(session, &mut terminal, country_id);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    result
}

fn run_wizard_tui_loop(
    session: &mut FlowSession,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    country_id: &str,
) -> Result<WizardExit, String> {
    let mut nav = WizardNavState::new();
    loop {
        let view_model = project_wizard_view_model(session, &nav, country_id)
            .ok_or_else(|| "wizard lost its active flow".to_string())?;
        nav.clamp_selection(view_model.items.len());
        terminal
            .draw(|frame| draw_wizard_ui(frame, &view_model))
            .map_err(|e| format!("failed to render wizard: {e}"))?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll wizard input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = wizard_action_from_key(key) else {
            continue;
        };
        let transition = match wizard_transition(&mut nav, session, action) {
            Ok(transition) => transition,
            Err(err) => {
                nav.status_text = err.to_string();
                continue;
            }
        };
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        match transition.effect {
            WizardEffect::None => {}
            WizardEffect::Completed => return Ok(WizardExit::Completed),
            WizardEffect::Quit => return Ok(WizardExit::Quit),
        }
    }
}
