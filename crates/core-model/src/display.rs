//! Renderer-facing projection of the viewport.

use crate::View;
use core_state::YankHighlight;
use core_text::Buffer;

/// Styling hook supplied by the host (syntax highlighting, ANSI styling).
pub trait LineHighlighter {
    fn highlight(&self, row: usize, line: &str) -> String;
}

/// Returns lines unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl LineHighlighter for PlainHighlighter {
    fn highlight(&self, _row: usize, line: &str) -> String {
        line.to_string()
    }
}

impl<F> LineHighlighter for F
where
    F: Fn(usize, &str) -> String,
{
    fn highlight(&self, row: usize, line: &str) -> String {
        self(row, line)
    }
}

/// One viewport row. Padding rows past the buffer end carry no row/number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub row: Option<usize>,
    /// 1-based absolute number, or the distance to the cursor row when
    /// relative numbering is on (the cursor row keeps its absolute number).
    pub number: Option<usize>,
    pub text: String,
    /// Char columns `[start, end)` of a live yank flash on this row.
    pub flash: Option<(usize, usize)>,
}

/// Project `view.visible_rows()` of `buffer`, padded to `view.height` rows.
/// Rows under `flash` carry the flashed column span.
pub fn visible_lines(
    buffer: &Buffer,
    view: &View,
    highlighter: &dyn LineHighlighter,
    relative: bool,
    flash: Option<&YankHighlight>,
) -> Vec<DisplayLine> {
    let cursor_row = view.cursor.row;
    view.visible_rows()
        .map(|row| match buffer.get_line(row) {
            Some(line) => {
                let number = if relative && row != cursor_row {
                    row.abs_diff(cursor_row)
                } else {
                    row + 1
                };
                DisplayLine {
                    row: Some(row),
                    number: Some(number),
                    text: highlighter.highlight(row, line),
                    flash: flash.and_then(|f| f.columns(row, buffer.line_len(row))),
                }
            }
            None => DisplayLine {
                row: None,
                number: None,
                text: String::new(),
                flash: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Position;
    use std::time::Duration;

    fn view(first: usize, height: usize, cursor_row: usize) -> View {
        let mut v = View::new(Position::new(cursor_row, 0), first);
        v.set_size(40, height);
        v
    }

    #[test]
    fn pads_past_buffer_end() {
        let buf = Buffer::from_text("a\nb");
        let lines = visible_lines(&buf, &view(0, 4, 0), &PlainHighlighter, false, None);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[1].number, Some(2));
        assert_eq!(lines[2].row, None);
        assert!(lines[3].text.is_empty());
    }

    #[test]
    fn relative_numbers_keep_cursor_row_absolute() {
        let buf = Buffer::from_text("A\nB\nC\nD\nE");
        let lines = visible_lines(&buf, &view(0, 5, 2), &PlainHighlighter, true, None);
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![Some(2), Some(1), Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn scrolled_window_and_highlighter() {
        let buf = Buffer::from_text("0\n1\n2\n3\n4\n5");
        let hl = |row: usize, line: &str| format!("<{row}:{line}>");
        let lines = visible_lines(&buf, &view(3, 2, 3), &hl, false, None);
        assert_eq!(lines[0].text, "<3:3>");
        assert_eq!(lines[1].text, "<4:4>");
        assert_eq!(lines[0].number, Some(4));
    }

    #[test]
    fn zero_height_is_empty() {
        let buf = Buffer::from_text("x");
        assert!(visible_lines(&buf, &view(0, 0, 0), &PlainHighlighter, false, None).is_empty());
    }

    #[test]
    fn yank_flash_marks_covered_rows() {
        let buf = Buffer::from_text("hello
world
again");
        let span = YankHighlight::new(
            Position::new(1, 3),
            Position::new(0, 2),
            false,
            Duration::from_secs(1),
        );
        let lines = visible_lines(&buf, &view(0, 4, 0), &PlainHighlighter, false, Some(&span));
        let flashes: Vec<_> = lines.iter().map(|l| l.flash).collect();
        assert_eq!(flashes, vec![Some((2, 5)), Some((0, 4)), None, None]);

        let whole = YankHighlight::new(Position::new(2, 0), Position::new(2, 0), true, Duration::ZERO);
        let lines = visible_lines(&buf, &view(0, 3, 0), &PlainHighlighter, false, Some(&whole));
        assert_eq!(lines[2].flash, Some((0, 5)));
        assert_eq!(lines[0].flash, None);
    }
}
