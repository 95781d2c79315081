use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line text input with grapheme-aware cursor editing
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    /// Cursor position as byte index in the content string
    cursor_position: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in graphemes, not bytes
    pub fn len(&self) -> usize {
        self.content.graphemes(true).count()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Return the content and leave the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.content)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor_position, s);
        self.cursor_position += s.len();
    }

    /// Delete the grapheme under the cursor (Delete key)
    pub fn delete_char(&mut self) -> bool {
        let next = self.next_boundary();
        if next == self.cursor_position {
            return false;
        }
        self.content.drain(self.cursor_position..next);
        true
    }

    /// Delete the grapheme before the cursor (Backspace key)
    pub fn backspace(&mut self) -> bool {
        let previous = self.previous_boundary();
        if previous == self.cursor_position {
            return false;
        }
        self.content.drain(previous..self.cursor_position);
        self.cursor_position = previous;
        true
    }

    pub fn move_left(&mut self) -> bool {
        let previous = self.previous_boundary();
        let moved = previous != self.cursor_position;
        self.cursor_position = previous;
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let next = self.next_boundary();
        let moved = next != self.cursor_position;
        self.cursor_position = next;
        moved
    }

    pub fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_position = self.content.len();
    }

    /// Display column of the cursor, accounting for wide characters
    pub fn cursor_display_column(&self) -> u16 {
        self.content[..self.cursor_position].width() as u16
    }

    fn previous_boundary(&self) -> usize {
        self.content
            .grapheme_indices(true)
            .map(|(idx, _)| idx)
            .take_while(|idx| *idx < self.cursor_position)
            .last()
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content
            .grapheme_indices(true)
            .find(|(idx, _)| *idx >= self.cursor_position)
            .map(|(idx, grapheme)| idx + grapheme.len())
            .unwrap_or(self.content.len())
    }
}
