use super::navigation::WizardNavState;
use crate::engine::FlowSession;
use crate::pathway::initialize_verb;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub title: String,
    /// Set on naming steps, e.g. "Initialise report" for the UK.
    pub primary_action: Option<String>,
    pub location_line: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub hint_text: String,
    pub status_text: String,
}

/// Returns `None` when no flow is active.
pub fn project_wizard_view_model(
    session: &FlowSession,
    state: &WizardNavState,
    country_id: &str,
) -> Option<WizardViewModel> {
    let context = session.frame_context()?;
    let mut location_line = format!(
        "Flow: {} | Frame: {} | Depth: {}",
        context.flow.key(),
        context.frame.key(),
        context.flow_depth
    );
    if let Some(parent) = &context.parent_flow_context {
        location_line.push_str(&format!(
            " | Returns to: {}/{}",
            parent.parent_flow, parent.parent_frame
        ));
    }
    let items = context
        .frame
        .transitions()
        .iter()
        .map(|(event, target)| format!("{event} -> {target}"))
        .collect();
    Some(WizardViewModel {
        title: context.frame.component().title().to_string(),
        primary_action: context
            .frame
            .component()
            .label_subject()
            .map(|subject| format!("{} {subject}", initialize_verb(country_id))),
        location_line,
        items,
        selected: state.selected,
        hint_text: state.hint_text.clone(),
        status_text: state.status_text.clone(),
    })
}

pub fn draw_wizard_ui(frame: &mut Frame<'_>, view_model: &WizardViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(view_model.location_line.clone()),
    ]);
    let mut header_block = Block::default().borders(Borders::ALL);
    if let Some(action) = &view_model.primary_action {
        header_block = header_block.title(format!("Enter: {action}"));
    }
    let header = header.block(header_block);
    frame.render_widget(header, chunks[0]);

    let mut items = Vec::with_capacity(view_model.items.len());
    for (idx, label) in view_model.items.iter().enumerate() {
        let mut item = ListItem::new(Line::from(Span::raw(label.clone())));
        if idx == view_model.selected {
            item = item.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        items.push(item);
    }
    let events = List::new(items).block(
        Block::default()
            .title("Events")
            .borders(Borders::ALL)
            .padding(Padding::new(3, 3, 1, 1)),
    );
    frame.render_widget(events, chunks[1]);

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(format!("Status: {}", view_model.status_text)),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}
