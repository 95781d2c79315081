use crate::input::InputBuffer;
use bionic_core::{Message, Role};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Transcript of the concierge conversation, pinned to the newest message
pub struct ChatWidget<'a> {
    messages: &'a [Message],
    scroll_back: usize,
    pending: Option<&'a str>,
}

impl<'a> ChatWidget<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            scroll_back: 0,
            pending: None,
        }
    }

    /// Lines scrolled back from the bottom
    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Trailing indicator shown while a reply is outstanding
    pub fn pending(mut self, label: Option<&'a str>) -> Self {
        self.pending = label;
        self
    }

    fn format_message(message: &'a Message) -> Vec<Line<'a>> {
        let author_style = match message.role {
            Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Role::Assistant => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        };

        let mut lines = vec![Line::from(Span::styled(message.author_label(), author_style))];
        lines.extend(message.content.lines().map(Line::from));
        lines.push(Line::from(""));
        lines
    }
}

/// Rows a set of lines occupies once wrapped to `width`
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let line_width: usize = line.spans.iter().map(|s| s.content.width()).sum();
            line_width.div_ceil(width).max(1)
        })
        .sum()
}

impl<'a> Widget for ChatWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.scroll_back > 0 {
            "Conversation (↓ to follow)"
        } else {
            "Conversation (↑/↓ to scroll)"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);

        let mut lines: Vec<Line> = self
            .messages
            .iter()
            .flat_map(Self::format_message)
            .collect();
        if let Some(label) = self.pending {
            lines.push(Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        let total = wrapped_height(&lines, inner.width);
        let visible = inner.height as usize;
        let top = total
            .saturating_sub(visible)
            .saturating_sub(self.scroll_back);

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((top.min(u16::MAX as usize) as u16, 0));

        block.render(area, buf);
        paragraph.render(inner, buf);
    }
}

/// Single-line input box bound to an InputBuffer
pub struct InputWidget<'a> {
    input_buffer: &'a InputBuffer,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(input_buffer: &'a InputBuffer) -> Self {
        Self {
            input_buffer,
            title: "",
            placeholder: "Type a message...",
            focused: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::Yellow } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);

        let (text, style) = if self.input_buffer.is_empty() {
            (self.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (self.input_buffer.content(), Style::default().fg(Color::White))
        };

        // Keep the cursor in view by scrolling long input horizontally
        let cursor = self.input_buffer.cursor_display_column();
        let offset = cursor.saturating_sub(inner.width.saturating_sub(1));

        block.render(area, buf);
        Paragraph::new(text)
            .style(style)
            .scroll((0, offset))
            .render(inner, buf);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (cursor - offset).min(inner.width - 1);
            let cell = &mut buf[(x, inner.y)];
            cell.set_style(cell.style().add_modifier(Modifier::REVERSED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("abcdefghij"), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 4), 3 + 1 + 1);
        assert_eq!(wrapped_height(&lines, 20), 3);
    }

    #[test]
    fn test_chat_renders_latest_message() {
        let messages = vec![
            Message::assistant("Welcome."),
            Message::user("Jane Doe, $3M"),
        ];
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        ChatWidget::new(&messages).render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("Jane Doe, $3M"));
    }
}
