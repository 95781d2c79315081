use crate::state::AppState;
use bionic_core::{PropensityCategory, PropertyLead};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

fn category_style(category: Option<PropensityCategory>) -> Style {
    match category {
        Some(PropensityCategory::Hot) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Some(PropensityCategory::Warm) => Style::default().fg(Color::Yellow),
        Some(PropensityCategory::Stable) => Style::default().fg(Color::Gray),
        None => Style::default().fg(Color::DarkGray),
    }
}

fn lead_row(lead: &PropertyLead) -> Row<'_> {
    let score = lead
        .propensity_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let category = lead
        .propensity_category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Unscored".to_string());

    Row::new(vec![
        Cell::from(lead.owner_name.as_str()),
        Cell::from(lead.address.as_str()),
        Cell::from(lead.years_owned.to_string()),
        Cell::from(lead.estimated_equity.as_str()),
        Cell::from(lead.estimated_value.as_str()),
        Cell::from(score),
        Cell::from(category).style(category_style(lead.propensity_category)),
    ])
}

/// Render the lead table and the high-propensity targets panel
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let title = if state.hunter.is_busy() {
        "Farm Leads (analyzing...)"
    } else {
        "Farm Leads [Enter: Run Propensity Analysis]"
    };
    let header = Row::new(vec!["Owner", "Address", "Yrs", "Equity", "Value", "Score", "Category"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(
        state.hunter.leads().iter().map(lead_row),
        [
            Constraint::Percentage(20),
            Constraint::Percentage(32),
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default().with_selected(Some(state.selected_lead()));
    frame.render_stateful_widget(table, columns[0], &mut table_state);

    let mut lines = Vec::new();
    if !state.hunter.has_analyzed() {
        lines.push(Line::from(Span::styled(
            "Run the propensity analysis to surface likely sellers.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for lead in state.hunter.high_propensity() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", lead.propensity_score.unwrap_or_default()),
                    category_style(lead.propensity_category),
                ),
                Span::styled(
                    lead.owner_name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                lead.address.as_str(),
                Style::default().fg(Color::Gray),
            )));
            if let Some(reasoning) = &lead.propensity_reasoning {
                lines.push(Line::from(reasoning.as_str()));
            }
            lines.push(Line::from(""));
        }
    }
    if let Some(message) = state.hunter.status().failure() {
        lines.push(Line::from(Span::styled(
            format!("Analysis failed: {}", message),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("High Propensity Targets"),
            ),
        columns[1],
    );
}
