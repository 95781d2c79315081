use crate::state::{AppState, MultiplierField};
use crate::ui::widgets::InputWidget;
use bionic_core::{MarketingContent, BULLET};
use bionic_workflows::{CopyTarget, WorkflowStatus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Instant;

/// Render the notes-to-copy and photo analysis panels
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_inputs(frame, state, columns[0]);
    render_copy_cards(frame, state, columns[1]);
}

fn render_inputs(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Notes
            Constraint::Length(3), // Image path
            Constraint::Min(6),    // Room analysis
        ])
        .split(area);

    let notes_title = match state.marketing.copy_status() {
        WorkflowStatus::Busy => "Property Notes (generating...)",
        _ => "Property Notes (Enter to generate)",
    };
    frame.render_widget(
        InputWidget::new(state.notes_input())
            .title(notes_title)
            .placeholder("5 bed, infinity pool, canyon views...")
            .focused(state.multiplier_field() == MultiplierField::Notes),
        chunks[0],
    );
    frame.render_widget(
        InputWidget::new(state.image_path_input())
            .title("Room Photo Path (Enter to analyze)")
            .placeholder("/path/to/living-room.jpg")
            .focused(state.multiplier_field() == MultiplierField::ImagePath),
        chunks[1],
    );

    let analysis_title = if state.marketing.selected_image().is_some() {
        "Room Analysis [Del on empty path: remove photo]"
    } else {
        "Room Analysis"
    };
    let mut lines = Vec::new();
    if let Some(image) = state.marketing.selected_image() {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", image.name(), image.mime_type()),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    match (state.marketing.visible_analysis(), state.marketing.analysis_status()) {
        (_, WorkflowStatus::Busy) => lines.push(Line::from("Analyzing the room...")),
        (Some(analysis), _) => {
            lines.push(Line::from(vec![
                Span::styled("Style: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(analysis.architectural_style.as_str()),
            ]));
            lines.push(Line::from(""));
            for feature in &analysis.top_selling_features {
                lines.push(Line::from(format!("{} {}", BULLET, feature)));
            }
        }
        (None, WorkflowStatus::Failed(message)) => lines.push(Line::from(Span::styled(
            format!("Analysis failed: {}", message),
            Style::default().fg(Color::Red),
        ))),
        (None, WorkflowStatus::Idle) => lines.push(Line::from(Span::styled(
            "Select a room photo to surface its selling features.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(analysis_title)),
        chunks[2],
    );
}

fn render_copy_cards(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(content) = state.marketing.content() else {
        let text = match state.marketing.copy_status() {
            WorkflowStatus::Busy => "Drafting your marketing suite...".to_string(),
            WorkflowStatus::Failed(message) => format!("Generation failed: {}", message),
            WorkflowStatus::Idle => {
                "Enter property notes to generate a listing, caption, and flyer.".to_string()
            }
        };
        frame.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Marketing Suite")),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(area);

    let now = Instant::now();
    render_card(
        frame,
        chunks[0],
        card_title(state, now, "Professional Listing", CopyTarget::Listing, "Alt+L"),
        Text::from(content.professional_listing.as_str()),
    );
    render_card(
        frame,
        chunks[1],
        card_title(state, now, "Instagram Caption", CopyTarget::Caption, "Alt+C"),
        Text::from(content.instagram_caption.as_str()),
    );
    render_card(
        frame,
        chunks[2],
        card_title(state, now, "Flyer Points", CopyTarget::Flyer, "Alt+F, Alt+1-3"),
        flyer_text(state, now, content),
    );
}

fn card_title(state: &AppState, now: Instant, name: &str, target: CopyTarget, keys: &str) -> String {
    if state.is_copied(target, now) {
        format!("{} ✓ Copied", name)
    } else {
        format!("{} [{}]", name, keys)
    }
}

fn flyer_text<'a>(state: &AppState, now: Instant, content: &'a MarketingContent) -> Text<'a> {
    let lines: Vec<Line> = content
        .flyer_points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut spans = vec![Span::raw(format!("{} ", BULLET)), Span::raw(point.as_str())];
            if state.is_copied(CopyTarget::FlyerPoint(i), now) {
                spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
            }
            Line::from(spans)
        })
        .collect();
    Text::from(lines)
}

fn render_card(frame: &mut Frame, area: Rect, title: String, body: Text) {
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}
