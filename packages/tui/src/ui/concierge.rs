use crate::state::AppState;
use crate::ui::widgets::{ChatWidget, InputWidget};
use bionic_workflows::ConciergeState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Render the concierge chat with its qualified-lead badge
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Lead badge
            Constraint::Min(5),    // Transcript
            Constraint::Length(3), // Input
        ])
        .split(area);

    let badge = match state.concierge.qualified_lead() {
        Some(lead) => Line::from(vec![
            Span::styled(
                " ✔ QUALIFIED ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} • {}", lead.name, lead.budget)),
        ]),
        None => Line::from(Span::styled(
            "No lead qualified yet",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(
        Paragraph::new(badge).block(Block::default().borders(Borders::ALL).title("Lead Status")),
        chunks[0],
    );

    let pending = match state.concierge.state() {
        ConciergeState::Idle => None,
        ConciergeState::AwaitingReply => Some("Concierge is typing..."),
        ConciergeState::ToolInFlight => Some("Updating the CRM..."),
    };
    frame.render_widget(
        ChatWidget::new(state.concierge.messages())
            .scroll_back(state.chat_scroll())
            .pending(pending),
        chunks[1],
    );

    let placeholder = if state.concierge.is_busy() {
        "Waiting for the concierge..."
    } else {
        "Tell the concierge about your client..."
    };
    frame.render_widget(
        InputWidget::new(state.chat_input())
            .title("Message")
            .placeholder(placeholder)
            .focused(!state.concierge.is_busy()),
        chunks[2],
    );
}
