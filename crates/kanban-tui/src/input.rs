/// Single-line text buffer with a byte-offset cursor on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Buffer contents with surrounding whitespace removed; empties the buffer.
    pub fn take_trimmed(&mut self) -> String {
        let text = self.buffer.trim().to_string();
        self.clear();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        text.chars().for_each(|c| input.insert_char(c));
        input
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.as_str(), "abc");
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut input = typed("añ");
        input.backspace();
        assert_eq!(input.as_str(), "a");
        input.backspace();
        input.backspace();
        assert!(input.is_empty());
    }

    #[test]
    fn test_delete_and_home_end() {
        let mut input = typed("xyz");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "yz");
        input.move_end();
        input.delete();
        assert_eq!(input.as_str(), "yz");
        input.move_right();
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_take_trimmed_clears() {
        let mut input = typed("  Fix bug ");
        assert_eq!(input.take_trimmed(), "Fix bug");
        assert!(input.is_empty());
        assert_eq!(input.cursor_column(), 0);
    }
}
