use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }

    const fn position(self) -> (usize, usize) {
        (self.line, self.col)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A cursor motion, optionally extending the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// Start of the current line.
    Home,
    /// End of the current line.
    End,
    WordLeft,
    WordRight,
    /// Start of the buffer.
    BufferStart,
    /// End of the buffer.
    BufferEnd,
    /// Up by n lines, keeping the sticky column.
    PageUp(usize),
    /// Down by n lines, keeping the sticky column.
    PageDown(usize),
}

/// The text surface of the editor: a rope, a cursor, and an optional
/// selection anchor.
///
/// The selection spans from the anchor to the cursor, in either order.
/// Inserting or deleting while a selection is active replaces the selection.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        let content = s
            .strip_suffix("\r\n")
            .or_else(|| s.strip_suffix('\n'))
            .or_else(|| s.strip_suffix('\r'))
            .unwrap_or(&s);
        Some(content.to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole content and reset the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    // --- Selection ---

    /// Whether a non-empty selection is active.
    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    /// The selection as an ordered `(start, end)` pair, if non-empty.
    pub fn selection_range(&self) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        if anchor.position() == self.cursor.position() {
            return None;
        }
        if anchor.position() < self.cursor.position() {
            Some((anchor, self.cursor))
        } else {
            Some((self.cursor, anchor))
        }
    }

    /// The selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let a = self.char_idx_at(start);
        let b = self.char_idx_at(end);
        Some(self.rope.slice(a..b).to_string())
    }

    /// Remove the selected text and return it. The cursor lands at the
    /// start of the removed range.
    pub fn delete_selection(&mut self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let a = self.char_idx_at(start);
        let b = self.char_idx_at(end);
        let removed = self.rope.slice(a..b).to_string();
        self.rope.remove(a..b);
        self.cursor = self.cursor_at_char(a);
        self.anchor = None;
        Some(removed)
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(Cursor::new());
        self.move_to_end();
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Apply a motion. With `extend`, the selection anchor is planted at the
    /// current cursor (if not already set) before moving; otherwise any
    /// selection is dropped.
    pub fn apply_motion(&mut self, motion: Motion, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => self.move_vertical(-1),
            Motion::Down => self.move_vertical(1),
            Motion::Home => self.cursor.set_col(0),
            Motion::End => self.move_end(),
            Motion::WordLeft => self.move_word_left(),
            Motion::WordRight => self.move_word_right(),
            Motion::BufferStart => self.cursor = Cursor::new(),
            Motion::BufferEnd => self.move_to_end(),
            Motion::PageUp(n) => self.move_vertical(-isize::try_from(n).unwrap_or(isize::MAX)),
            Motion::PageDown(n) => self.move_vertical(isize::try_from(n).unwrap_or(isize::MAX)),
        }
    }

    // --- Editing ---

    /// Insert a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let char_idx = self.char_idx_at(self.cursor);
        self.rope.insert_char(char_idx, ch);
        self.cursor = self.cursor_at_char(char_idx + 1);
    }

    /// Insert a string at the cursor, replacing any selection. The cursor
    /// ends up after the inserted text.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        if s.is_empty() {
            return;
        }
        let char_idx = self.char_idx_at(self.cursor);
        self.rope.insert(char_idx, s);
        let end = char_idx + s.chars().count();
        self.cursor = self.cursor_at_char(end);
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection().is_some() {
            return true;
        }
        let char_idx = self.char_idx_at(self.cursor);
        if char_idx == 0 {
            self.anchor = None;
            return false;
        }
        let mut start = char_idx - 1;
        // A CRLF pair is one line break.
        if self.rope.char(start) == '\n' && start > 0 && self.rope.char(start - 1) == '\r' {
            start -= 1;
        }
        self.rope.remove(start..char_idx);
        self.cursor = self.cursor_at_char(start);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection().is_some() {
            return true;
        }
        self.anchor = None;
        let char_idx = self.char_idx_at(self.cursor);
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        let mut end = char_idx + 1;
        if self.rope.char(char_idx) == '\r'
            && end < self.rope.len_chars()
            && self.rope.char(end) == '\n'
        {
            end += 1;
        }
        self.rope.remove(char_idx..end);
        // The removal may join a lone CR with a following LF.
        self.cursor = self.cursor_at_char(char_idx);
        true
    }

    /// Move cursor to a specific line and column, dropping any selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let line_text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(line_text.len());
        while !line_text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Extend the selection to a position, planting the anchor at the
    /// cursor first if no selection is active (mouse drag).
    pub fn select_to(&mut self, line: usize, col: usize) {
        let anchor = self.anchor.unwrap_or(self.cursor);
        self.move_to(line, col);
        self.anchor = Some(anchor);
    }

    // --- Private helpers ---

    /// Convert a position to a ropey char index.
    fn char_idx_at(&self, pos: Cursor) -> usize {
        let line = pos.line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line);
        let line_text = self.line_at(line).unwrap_or_default();
        let char_offset = line_text
            .char_indices()
            .take_while(|(i, _)| *i < pos.col)
            .count();
        line_start + char_offset
    }

    /// Convert a ropey char index to a position. An index inside a CRLF
    /// pair maps to the end of its line.
    fn cursor_at_char(&self, char_idx: usize) -> Cursor {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self.rope.slice(line_start..char_idx).len_bytes();
        Cursor::at(line, col.min(self.line_len(line)))
    }

    fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let max_line = self.line_count().saturating_sub(1);
        let target = self
            .cursor
            .line
            .saturating_add_signed(delta)
            .min(max_line);
        if target == self.cursor.line {
            return;
        }
        self.cursor.line = target;
        let line = self.line_at(target).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.col = col;
    }

    fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let trimmed = line[..self.cursor.col].trim_end();
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .finish()
    }
}
