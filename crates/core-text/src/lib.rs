//! Line-oriented text buffer.
//!
//! A `Buffer` is an ordered list of lines without their terminating newline.
//! Columns are char (Unicode scalar) indices into a line, never byte offsets;
//! the conversion to byte offsets happens only at the splice sites below.
//!
//! Invariants (hold after every public call):
//! * at least one line exists (a cleared buffer is a single empty line)
//! * no stored line contains `'\n'`
//!
//! Row arguments outside `0..line_count()` are a caller bug and panic. Column
//! arguments past the end of a line are clamped to the line length.

pub mod motion;

/// Tab stop width used when measuring on-screen line length.
pub const TAB_WIDTH: usize = 4;

/// A cursor location expressed as (row, column). Ordering is lexicographic
/// by row, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Return `(start, end)` with `start <= end`, swapping when needed.
    pub fn ordered(a: Position, b: Position) -> (Position, Position) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty buffer holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Build a buffer by splitting `content` on `'\n'`. A trailing newline
    /// therefore yields a trailing empty line, so `text()` round-trips.
    pub fn from_text(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Borrow line `row`. Panics when `row` is out of range.
    pub fn line(&self, row: usize) -> &str {
        self.check_row(row);
        &self.lines[row]
    }

    /// Non-panicking variant of [`Buffer::line`].
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Character count of line `row`.
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    /// On-screen length of line `row` with tabs expanded to the next tab stop.
    pub fn visual_line_len(&self, row: usize) -> usize {
        self.line(row).chars().fold(0, |width, ch| {
            if ch == '\t' {
                width + TAB_WIDTH - width % TAB_WIDTH
            } else {
                width + 1
            }
        })
    }

    /// Splice `text` into line `row` at `col`. Newlines inside `text` split
    /// the line: the head before `col` keeps the first segment and the tail
    /// after `col` follows the last segment.
    pub fn insert_at(&mut self, row: usize, col: usize, text: &str) {
        self.check_row(row);
        if text.is_empty() {
            return;
        }
        let line = &self.lines[row];
        let split = byte_offset(line, col);
        let head = line[..split].to_owned();
        let tail = line[split..].to_owned();

        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();
        let Some((last, middle)) = rest.split_last() else {
            self.lines[row] = format!("{head}{first}{tail}");
            return;
        };
        self.lines[row] = format!("{head}{first}");
        let inserted = middle
            .iter()
            .map(|s| (*s).to_owned())
            .chain(std::iter::once(format!("{last}{tail}")));
        self.lines.splice(row + 1..row + 1, inserted);
    }

    /// Delete between two positions.
    ///
    /// On a single row both end columns are included, so `delete_at(r, c, r, c)`
    /// removes the character under `c`. Across rows the head of `start_row`
    /// before `start_col` is joined with the tail of `end_row` from `end_col`
    /// onward; rows strictly between are dropped. Joining a line with the next
    /// one is therefore `delete_at(r, line_len(r), r + 1, 0)`.
    pub fn delete_at(&mut self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) {
        let (start, end) = Position::ordered(
            Position::new(start_row, start_col),
            Position::new(end_row, end_col),
        );
        self.check_row(start.row);
        self.check_row(end.row);

        if start.row == end.row {
            let line = &self.lines[start.row];
            let from = byte_offset(line, start.col);
            let to = byte_offset(line, end.col.saturating_add(1));
            if from < to {
                self.lines[start.row].replace_range(from..to, "");
            }
            return;
        }

        let head_end = byte_offset(&self.lines[start.row], start.col);
        let tail_start = byte_offset(&self.lines[end.row], end.col);
        let joined = format!(
            "{}{}",
            &self.lines[start.row][..head_end],
            &self.lines[end.row][tail_start..]
        );
        self.lines.drain(start.row + 1..=end.row);
        self.lines[start.row] = joined;
    }

    /// Delete the span from `start` through `end`, both included.
    pub fn delete_range(&mut self, start: Position, end: Position) {
        let (start, end) = Position::ordered(start, end);
        if start.row == end.row {
            self.delete_at(start.row, start.col, end.row, end.col);
        } else {
            self.delete_at(start.row, start.col, end.row, end.col.saturating_add(1));
        }
    }

    /// Text from `start` through `end`, both included. Rows are joined with `'\n'`.
    pub fn get_range(&self, start: Position, end: Position) -> String {
        let (start, end) = Position::ordered(start, end);
        self.check_row(start.row);
        self.check_row(end.row);

        if start.row == end.row {
            return slice_chars(&self.lines[start.row], start.col, end.col.saturating_add(1))
                .to_owned();
        }

        let mut out = String::new();
        let first = &self.lines[start.row];
        out.push_str(&first[byte_offset(first, start.col)..]);
        for line in &self.lines[start.row + 1..end.row] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(slice_chars(&self.lines[end.row], 0, end.col.saturating_add(1)));
        out
    }

    /// Insert `text` as a new line at index `row` (`row == line_count()` appends).
    pub fn insert_line(&mut self, row: usize, text: &str) {
        assert!(
            row <= self.lines.len(),
            "insert_line row {row} out of range (line_count = {})",
            self.lines.len()
        );
        self.lines
            .splice(row..row, text.split('\n').map(str::to_owned));
    }

    /// Remove line `row`, returning its content. Removing the only line
    /// leaves a single empty line behind.
    pub fn delete_line(&mut self, row: usize) -> String {
        self.check_row(row);
        if self.lines.len() == 1 {
            return std::mem::take(&mut self.lines[0]);
        }
        self.lines.remove(row)
    }

    /// Replace the content of line `row`.
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.check_row(row);
        let mut parts = text.split('\n');
        self.lines[row] = parts.next().unwrap_or_default().to_owned();
        let rest: Vec<String> = parts.map(str::to_owned).collect();
        if !rest.is_empty() {
            self.lines.splice(row + 1..row + 1, rest);
        }
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(String::new());
    }

    /// Swap in a full line set (used by history restore). An empty set becomes
    /// one empty line.
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    fn check_row(&self, row: usize) {
        assert!(
            row < self.lines.len(),
            "row {row} out of range (line_count = {})",
            self.lines.len()
        );
    }
}

/// Byte offset of char column `col` in `line`, clamped to the line end.
pub fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(b, _)| b)
}

/// Slice chars `[from, to)` of `line`, clamped to the line.
pub fn slice_chars(line: &str, from: usize, to: usize) -> &str {
    let a = byte_offset(line, from);
    let b = byte_offset(line, to);
    if a >= b { "" } else { &line[a..b] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_buffer_and_read_line() {
        let b = Buffer::from_text("Line 1\nLine 2\nLine 3");
        assert_eq!(b.line_count(), 3);
        assert_eq!(b.line(1), "Line 2");
        assert_eq!(b.line_len(0), 6);
        assert_eq!(b.text(), "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn empty_content_is_one_line() {
        let b = Buffer::from_text("");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), "");
        assert_eq!(Buffer::new(), b);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn line_out_of_range_panics() {
        let b = Buffer::from_text("only");
        let _ = b.line(1);
    }

    #[test]
    fn insert_inline_and_at_edges() {
        let mut b = Buffer::from_text("Initial content");
        b.insert_at(0, 7, " modified");
        assert_eq!(b.text(), "Initial modified content");
        b.insert_at(0, 0, ">");
        b.insert_at(0, b.line_len(0), "<");
        assert_eq!(b.text(), ">Initial modified content<");
    }

    #[test]
    fn insert_multiline_splits_line() {
        let mut b = Buffer::from_text("Hello World");
        b.insert_at(0, 5, "\nNew Line\n");
        assert_eq!(b.line_count(), 3);
        assert_eq!(b.text(), "Hello\nNew Line\n World");
    }

    #[test]
    fn insert_col_past_end_appends() {
        let mut b = Buffer::from_text("abc");
        b.insert_at(0, 99, "d");
        assert_eq!(b.text(), "abcd");
    }

    #[test]
    fn delete_single_row_is_inclusive() {
        let mut b = Buffer::from_text("Hello World\nLine 2");
        b.delete_at(0, 5, 0, 5);
        assert_eq!(b.text(), "HelloWorld\nLine 2");
        b.delete_range(Position::new(0, 5), Position::new(0, 9));
        assert_eq!(b.text(), "Hello\nLine 2");
    }

    #[test]
    fn delete_at_joins_lines_at_boundary() {
        let mut b = Buffer::from_text("Hello\nLine 2");
        b.delete_at(0, 5, 1, 0);
        assert_eq!(b.text(), "HelloLine 2");
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn delete_range_across_rows() {
        let mut b = Buffer::from_text("Line 1\nLine 2\nLine 3");
        b.delete_range(Position::new(0, 5), Position::new(1, 2));
        assert_eq!(b.text(), "Line e 2\nLine 3");

        let mut b = Buffer::from_text("Line 1\nLine 2\nLine 3\nLine 4");
        b.delete_range(Position::new(0, 3), Position::new(2, 3));
        assert_eq!(b.text(), "Lin 3\nLine 4");
    }

    #[test]
    fn delete_range_accepts_reversed_endpoints() {
        let mut b = Buffer::from_text("abcdef");
        b.delete_range(Position::new(0, 3), Position::new(0, 1));
        assert_eq!(b.text(), "aef");
    }

    #[test]
    fn get_range_is_inclusive() {
        let b = Buffer::from_text("Hello World");
        assert_eq!(b.get_range(Position::new(0, 0), Position::new(0, 4)), "Hello");
        let b = Buffer::from_text("Line 1\nLine 2\nLine 3");
        assert_eq!(
            b.get_range(Position::new(0, 0), Position::new(1, 2)),
            "Line 1\nLin"
        );
        assert_eq!(
            b.get_range(Position::new(0, 5), Position::new(2, 0)),
            "1\nLine 2\nL"
        );
    }

    #[test]
    fn line_operations() {
        let mut b = Buffer::from_text("Line 1\nLine 2\nLine 3");
        b.insert_line(1, "New Line");
        assert_eq!(b.text(), "Line 1\nNew Line\nLine 2\nLine 3");
        assert_eq!(b.delete_line(2), "Line 2");
        assert_eq!(b.text(), "Line 1\nNew Line\nLine 3");
        b.set_line(0, "First");
        assert_eq!(b.line(0), "First");
        b.insert_line(b.line_count(), "");
        assert_eq!(b.line_count(), 4);
    }

    #[test]
    fn delete_last_line_leaves_empty_line() {
        let mut b = Buffer::from_text("solo");
        assert_eq!(b.delete_line(0), "solo");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.text(), "");
    }

    #[test]
    fn clear_and_replace_keep_one_line() {
        let mut b = Buffer::from_text("a\nb\nc");
        b.clear();
        assert_eq!(b.line_count(), 1);
        b.replace_lines(Vec::new());
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn visual_length_expands_tabs() {
        let b = Buffer::from_text("Line\twith\ttabs");
        assert!(b.visual_line_len(0) > b.line_len(0));
        let b = Buffer::from_text("\tx\nab\tc");
        assert_eq!(b.visual_line_len(0), 5);
        assert_eq!(b.visual_line_len(1), 5);
    }

    #[test]
    fn multibyte_columns_are_chars() {
        let mut b = Buffer::from_text("héllo");
        assert_eq!(b.line_len(0), 5);
        b.delete_at(0, 1, 0, 1);
        assert_eq!(b.text(), "hllo");
        b.insert_at(0, 1, "é");
        assert_eq!(b.text(), "héllo");
    }

    #[test]
    fn position_ordering() {
        let a = Position::new(1, 5);
        let b = Position::new(2, 0);
        assert!(a < b);
        assert_eq!(Position::ordered(b, a), (a, b));
        assert_eq!(Position::ordered(a, a), (a, a));
    }
}
