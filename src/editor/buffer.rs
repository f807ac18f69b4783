use ropey::Rope;

/// Chars ropey treats as ending a line. `\r\n` counts as one break.
const LINE_BREAKS: [char; 7] = [
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}',
];

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in chars.
    pub col: usize,
    /// Column remembered across vertical moves.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Working copy of an item's content during an inline edit.
///
/// Backed by a rope so edits in long pages stay cheap. Columns are char
/// offsets, so multi-byte text needs no special casing by callers.
pub struct EditBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl EditBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            dirty: false,
        }
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether anything changed since the buffer was seeded.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let end = self.line_len(line_idx);
        Some(self.rope.line(line_idx).slice(..end).to_string())
    }

    /// Line length in chars, excluding the line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        self.rope.line(line_idx).len_chars() - self.line_break_len(line_idx)
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Consume the buffer, yielding the edited text.
    pub fn into_text(self) -> String {
        self.rope.to_string()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        self.place_cursor(idx + 1);
        self.dirty = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let idx = self.cursor_char_idx();
        self.rope.insert(idx, s);
        self.place_cursor(idx + s.chars().count());
        self.dirty = true;
    }

    /// Break the line at the cursor.
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the char before the cursor, joining lines at column 0.
    ///
    /// Returns `true` if anything was removed.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.line == 0 && self.cursor.col == 0 {
            return false;
        }
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            let line_start = self.rope.line_to_char(self.cursor.line);
            let break_len = self.line_break_len(self.cursor.line - 1);
            self.rope.remove(line_start - break_len..line_start);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let idx = self.cursor_char_idx();
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.dirty = true;
        true
    }

    /// Delete the char under the cursor, joining with the next line at the
    /// end of a line.
    ///
    /// Returns `true` if anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        let at_line_end = self.cursor.col >= self.line_len(self.cursor.line);
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let idx = self.cursor_char_idx();
        let width = if at_line_end {
            self.line_break_len(self.cursor.line)
        } else {
            1
        };
        self.rope.remove(idx..idx + width);
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.set_col(self.cursor.col - 1);
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.set_col(self.line_len(self.cursor.line));
                }
            }
            Direction::Right => {
                if self.cursor.col < self.line_len(self.cursor.line) {
                    self.cursor.set_col(self.cursor.col + 1);
                } else if self.cursor.line + 1 < self.line_count() {
                    self.cursor.line += 1;
                    self.cursor.set_col(0);
                }
            }
            Direction::Up if self.cursor.line > 0 => self.move_vertically(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertically(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::at(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor = Cursor::at(last, self.line_len(last));
    }

    fn move_vertically(&mut self, line: usize) {
        self.cursor.line = line;
        self.cursor.col = self.cursor.sticky_col.min(self.line_len(line));
    }

    // Any inserted break char may start a new line, so derive the position
    // from the rope rather than from the inserted text.
    fn place_cursor(&mut self, char_idx: usize) {
        let line = self.rope.char_to_line(char_idx);
        self.cursor.line = line;
        self.cursor.set_col(char_idx - self.rope.line_to_char(line));
    }

    fn cursor_char_idx(&self) -> usize {
        self.rope.line_to_char(self.cursor.line) + self.cursor.col.min(self.line_len(self.cursor.line))
    }

    /// Chars taken by the line break ending `line_idx`.
    fn line_break_len(&self, line_idx: usize) -> usize {
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        let last = len.checked_sub(1).map(|i| line.char(i));
        let before = len.checked_sub(2).map(|i| line.char(i));
        match (before, last) {
            (Some('\r'), Some('\n')) => 2,
            (_, Some(c)) if LINE_BREAKS.contains(&c) => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Debug for EditBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditBuffer")
            .field("rope", &format_args!("Rope({} lines)", self.rope.len_lines()))
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_buffer_is_clean_and_round_trips() {
        let buf = EditBuffer::from_text("Welcome to the mock page.");
        assert!(!buf.is_dirty());
        assert_eq!(buf.text(), "Welcome to the mock page.");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditBuffer::from_text("");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_insert_char_marks_dirty_and_advances() {
        let mut buf = EditBuffer::from_text("ello");
        buf.insert_char('H');
        assert_eq!(buf.text(), "Hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_multibyte_uses_char_columns() {
        let mut buf = EditBuffer::from_text("");
        buf.insert_char('é');
        buf.insert_char('t');
        buf.insert_char('é');
        assert_eq!(buf.text(), "été");
        assert_eq!(buf.cursor().col, 3);
        buf.move_cursor(Direction::Left);
        buf.insert_char('x');
        assert_eq!(buf.text(), "étxé");
    }

    #[test]
    fn test_insert_str_across_lines() {
        let mut buf = EditBuffer::from_text("end");
        buf.insert_str("one\ntwo ");
        assert_eq!(buf.text(), "one\ntwo end");
        assert_eq!(buf.cursor(), Cursor::at(1, 4));
    }

    #[test]
    fn test_split_line_moves_to_next_line() {
        let mut buf = EditBuffer::from_text("hello world");
        buf.move_to_end();
        for _ in 0..6 {
            buf.move_cursor(Direction::Left);
        }
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = EditBuffer::from_text("abc");
        assert!(!buf.delete_back());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditBuffer::from_text("ab\ncd");
        buf.move_cursor(Direction::Down);
        buf.move_home();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditBuffer::from_text("ab\r\ncd");
        buf.move_cursor(Direction::Down);
        buf.move_home();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_back_joins_lines_split_by_lone_cr() {
        let mut buf = EditBuffer::from_text("ab\rcd");
        buf.move_cursor(Direction::Down);
        buf.move_home();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_unicode_line_separator_ends_a_line() {
        let mut buf = EditBuffer::from_text("ab\u{2028}cd");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
        assert_eq!(buf.line_len(0), 2);
        buf.move_end();
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.insert_char('X');
        assert_eq!(buf.text(), "abX\u{2028}cd");
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_delete_forward_removes_form_feed_break() {
        let mut buf = EditBuffer::from_text("ab\u{000C}cd");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_insert_str_with_carriage_return_moves_to_new_line() {
        let mut buf = EditBuffer::from_text("end");
        buf.insert_str("one\rtwo ");
        assert_eq!(buf.cursor(), Cursor::at(1, 4));
        assert_eq!(buf.line_at(1), Some("two end".to_string()));
    }

    #[test]
    fn test_delete_forward_at_end_of_buffer_is_noop() {
        let mut buf = EditBuffer::from_text("ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_next_line() {
        let mut buf = EditBuffer::from_text("ab\ncd");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_vertical_moves_keep_sticky_column() {
        let mut buf = EditBuffer::from_text("long line\nx\nanother");
        buf.move_end();
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 1);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
    }

    #[test]
    fn test_left_at_line_start_wraps_to_previous_line_end() {
        let mut buf = EditBuffer::from_text("abc\nd");
        buf.move_cursor(Direction::Down);
        buf.move_home();
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_into_text_returns_edits() {
        let mut buf = EditBuffer::from_text("Here are...");
        buf.move_to_end();
        buf.insert_str(" more");
        assert_eq!(buf.into_text(), "Here are... more");
    }
}
