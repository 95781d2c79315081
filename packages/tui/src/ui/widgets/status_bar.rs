use crate::state::{AppState, MultiplierField, Tab};
use bionic_workflows::WorkflowStatus;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom bar with every workflow's status and the shortcuts for the current tab
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_span(label: &'a str, status: &WorkflowStatus) -> Vec<Span<'a>> {
        let style = match status {
            WorkflowStatus::Idle => Style::default().fg(Color::Green),
            WorkflowStatus::Busy => Style::default().fg(Color::Yellow),
            WorkflowStatus::Failed(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        vec![
            Span::styled(format!(" {}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(status.to_string(), style),
        ]
    }

    fn get_shortcuts(&self) -> &'static str {
        match (self.state.current_tab, self.state.multiplier_field()) {
            (Tab::Concierge, _) => "Enter: Send • ↑↓: Scroll • F1-F3: Tabs • Ctrl+C: Quit",
            (Tab::Multiplier, MultiplierField::Notes) => {
                "Enter: Generate • Tab: Image • Alt+L/C/F/1-3: Copy • Ctrl+C: Quit"
            }
            (Tab::Multiplier, MultiplierField::ImagePath) => {
                "Enter: Analyze • Tab: Notes • Esc: Clear • Del: Remove Photo • Ctrl+C: Quit"
            }
            (Tab::Hunter, _) => "Enter/r: Run Analysis • ↑↓: Select • Ctrl+C: Quit",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shortcuts = self.get_shortcuts();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(shortcuts.chars().count() as u16 + 1),
            ])
            .split(area);

        let mut spans = Vec::new();
        spans.extend(Self::status_span("Concierge", self.state.concierge.status()));
        spans.extend(Self::status_span("Copy", self.state.marketing.copy_status()));
        spans.extend(Self::status_span("Vision", self.state.marketing.analysis_status()));
        spans.extend(Self::status_span("Hunter", self.state.hunter.status()));
        if let Some(notice) = self.state.notice() {
            spans.push(Span::styled(
                format!(" • {}", notice),
                Style::default().fg(Color::Red),
            ));
        }

        Paragraph::new(Line::from(spans)).render(chunks[0], buf);
        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[1], buf);
    }
}
