//! Rope-backed document text with line/offset conversion.
//!
//! Provides the buffer primitives the editing commands run against: read access by line or char
//! range, and insert/remove/replace by char offset.

use crate::region::Region;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
///
/// Rope provides O(log N) line access, insertion, and deletion performance, suitable for large file editing
pub struct LineIndex {
    /// Rope data structure that automatically manages line indexing
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get line number and offset within line from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        let char_in_line = char_offset - line_start_char;

        (line_idx, char_in_line)
    }

    /// Get character offset from line number and column number
    ///
    /// The column is clamped to the line length; lines past the end map to the end of the text.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let region = self.line_region(line);
        region.start + column.min(region.len())
    }

    /// Char range of a line's content, excluding its line terminator.
    pub fn line_region(&self, line: usize) -> Region {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let start = self.rope.line_to_char(line);
        let slice = self.rope.line(line);

        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }

        Region::new(start, start + len)
    }

    /// Content regions of every line touched by `region`.
    ///
    /// A region ending exactly at the start of a line still includes that line, matching how a
    /// caret at column 0 addresses the line it sits on.
    pub fn lines_in(&self, region: Region) -> Vec<Region> {
        let first = self.rope.char_to_line(region.start.min(self.rope.len_chars()));
        let last = self.rope.char_to_line(region.end.min(self.rope.len_chars()));
        (first..=last).map(|line| self.line_region(line)).collect()
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Insert text (at specified character offset)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = (start_char + len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Replace a char range with new text.
    pub fn replace(&mut self, region: Region, text: &str) {
        self.delete(region.start, region.len());
        self.insert(region.start, text);
    }

    /// Get text in a char range
    pub fn slice(&self, region: Region) -> String {
        let end = region.end.min(self.rope.len_chars());
        let start = region.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get text of the specified line (excluding newline)
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        Some(self.slice(self.line_region(line_number)))
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_index() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(index.char_count(), 0);
    }

    #[test]
    fn test_char_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.char_offset_to_position(0), (0, 0)); // A
        assert_eq!(index.char_offset_to_position(2), (0, 2)); // C
        assert_eq!(index.char_offset_to_position(4), (1, 0)); // D
        assert_eq!(index.char_offset_to_position(8), (2, 0)); // G
    }

    #[test]
    fn test_position_to_char_offset_clamps_column() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.position_to_char_offset(1, 0), 4);
        assert_eq!(index.position_to_char_offset(0, 99), 3);
        assert_eq!(index.position_to_char_offset(9, 0), 11);
    }

    #[test]
    fn test_line_region_excludes_terminator() {
        let index = LineIndex::from_text("ab\r\ncd\n");

        assert_eq!(index.line_region(0), Region::new(0, 2));
        assert_eq!(index.line_region(1), Region::new(4, 6));
        assert_eq!(index.line_region(2), Region::new(7, 7));
    }

    #[test]
    fn test_lines_in_selection() {
        let index = LineIndex::from_text("a\nbb\nccc");

        assert_eq!(
            index.lines_in(Region::new(1, 5)),
            vec![Region::new(0, 1), Region::new(2, 4), Region::new(5, 8)]
        );
        assert_eq!(index.lines_in(Region::new(3, 3)), vec![Region::new(2, 4)]);
    }

    #[test]
    fn test_utf8_cjk() {
        let index = LineIndex::from_text("你好\n世界");

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.char_offset_to_position(3), (1, 0));
        assert_eq!(index.get_line_text(1).as_deref(), Some("世界"));
    }

    #[test]
    fn test_replace_text() {
        let mut index = LineIndex::from_text("Hello World");

        index.replace(Region::new(6, 11), "Rust");
        assert_eq!(index.get_text(), "Hello Rust");

        index.delete(0, 6);
        assert_eq!(index.get_text(), "Rust");
    }
}
