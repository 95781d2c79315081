pub mod concierge;
pub mod hunter;
pub mod multiplier;
pub mod widgets;

use crate::state::{AppState, Tab};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};
use widgets::StatusBarWidget;

/// Main UI rendering function
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(5),    // Active tab
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("F{} {}", i + 1, tab.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Bionic Brokerage "),
        )
        .select(state.current_tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    match state.current_tab {
        Tab::Concierge => concierge::render_with_area(frame, state, chunks[1]),
        Tab::Multiplier => multiplier::render_with_area(frame, state, chunks[1]),
        Tab::Hunter => hunter::render_with_area(frame, state, chunks[1]),
    }

    frame.render_widget(StatusBarWidget::new(state), chunks[2]);
}
