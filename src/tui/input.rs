use unicode_segmentation::UnicodeSegmentation;

/// A single-line text editor for the search box and modal prompts.
///
/// The cursor is a byte offset that always sits on a grapheme boundary,
/// so arrow keys and backspace treat multi-codepoint characters as one
/// unit.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> InputState {
        InputState::default()
    }

    pub fn with_text(text: impl Into<String>) -> InputState {
        let text = text.into();
        let cursor = text.len();
        InputState { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.cursor)
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        let start = self.prev_boundary();
        if start < self.cursor {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn delete(&mut self) {
        let end = self.next_boundary();
        if end > self.cursor {
            self.text.replace_range(self.cursor..end, "");
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_and_backspace() {
        let mut input = InputState::new();
        for c in "ns Games".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text(), "ns Games");
        input.backspace();
        assert_eq!(input.text(), "ns Game");
    }

    #[test]
    fn backspace_removes_a_whole_grapheme() {
        // e + combining acute is one grapheme, two chars
        let mut input = InputState::with_text("cafe\u{301}");
        input.backspace();
        assert_eq!(input.text(), "caf");
    }

    #[test]
    fn arrows_step_over_graphemes() {
        let mut input = InputState::with_text("a\u{1F5C2}b"); // a, 🗂 (4 bytes), b
        input.left();
        input.left();
        input.insert_char('x');
        assert_eq!(input.text(), "ax\u{1F5C2}b");
    }

    #[test]
    fn delete_removes_forward() {
        let mut input = InputState::with_text("abc");
        input.home();
        input.delete();
        assert_eq!(input.text(), "bc");
        input.end();
        input.delete();
        assert_eq!(input.text(), "bc");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = InputState::with_text("nsGames");
        input.home();
        input.right();
        input.right();
        input.insert_char(' ');
        assert_eq!(input.text(), "ns Games");
        let (before, after) = input.split_at_cursor();
        assert_eq!(before, "ns ");
        assert_eq!(after, "Games");
    }

    #[test]
    fn edges_are_safe() {
        let mut input = InputState::new();
        input.backspace();
        input.delete();
        input.left();
        input.right();
        assert_eq!(input.text(), "");
    }
}
