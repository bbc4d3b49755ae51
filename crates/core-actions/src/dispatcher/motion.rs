//! Cursor motions.
//!
//! Every motion takes the resolved count and repeats its atomic step that
//! many times. Column limits are applied afterwards by the mode-aware clamp
//! in `Editor::settle`, so handlers here only compute the raw target.

use crate::{Deferred, Editor};
use core_text::{Buffer, Position, motion};

pub(crate) fn left(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor_mut();
    cursor.col = cursor.col.saturating_sub(count);
    Deferred::None
}

pub(crate) fn right(ed: &mut Editor, count: usize) -> Deferred {
    let limit = ed.doc().line_len(ed.cursor().row);
    let cursor = ed.cursor_mut();
    cursor.col = cursor.col.saturating_add(count).min(limit);
    Deferred::None
}

pub(crate) fn down(ed: &mut Editor, count: usize) -> Deferred {
    let last = ed.doc().line_count() - 1;
    let cursor = ed.cursor_mut();
    cursor.row = cursor.row.saturating_add(count).min(last);
    Deferred::None
}

pub(crate) fn up(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor_mut();
    cursor.row = cursor.row.saturating_sub(count);
    Deferred::None
}

/// Space: one column right, wrapping to the start of the next line from the
/// last column.
pub(crate) fn advance(ed: &mut Editor, count: usize) -> Deferred {
    let mut pos = ed.cursor();
    let buf = ed.doc().buffer();
    for _ in 0..count {
        if pos.col + 1 < buf.line_len(pos.row) {
            pos.col += 1;
        } else if pos.row + 1 < buf.line_count() {
            pos = Position::new(pos.row + 1, 0);
        } else {
            break;
        }
    }
    *ed.cursor_mut() = pos;
    Deferred::None
}

fn repeat(ed: &mut Editor, count: usize, step: fn(&Buffer, &mut Position)) -> Deferred {
    let mut pos = ed.cursor();
    let buf = ed.doc().buffer();
    for _ in 0..count {
        step(buf, &mut pos);
    }
    *ed.cursor_mut() = pos;
    Deferred::None
}

pub(crate) fn word_forward(ed: &mut Editor, count: usize) -> Deferred {
    repeat(ed, count, motion::word_forward)
}

pub(crate) fn word_backward(ed: &mut Editor, count: usize) -> Deferred {
    repeat(ed, count, motion::word_backward)
}

pub(crate) fn word_end(ed: &mut Editor, count: usize) -> Deferred {
    repeat(ed, count, motion::word_end)
}

pub(crate) fn line_start(ed: &mut Editor, _count: usize) -> Deferred {
    ed.cursor_mut().col = 0;
    Deferred::None
}

pub(crate) fn first_non_blank(ed: &mut Editor, _count: usize) -> Deferred {
    let row = ed.cursor().row;
    let col = motion::first_non_blank(ed.doc().buffer(), row);
    ed.cursor_mut().col = col;
    Deferred::None
}

/// `$`: last char of the line `count - 1` rows below.
pub(crate) fn line_end(ed: &mut Editor, count: usize) -> Deferred {
    let last = ed.doc().line_count() - 1;
    let row = ed.cursor().row.saturating_add(count - 1).min(last);
    let col = ed.doc().line_len(row).saturating_sub(1);
    *ed.cursor_mut() = Position::new(row, col);
    Deferred::None
}

/// `gg`: first line, or line `N` when a count was typed.
pub(crate) fn goto_first_line(ed: &mut Editor, _count: usize) -> Deferred {
    let row = ed.explicit_count().map_or(0, |n| n.saturating_sub(1));
    goto_line(ed, row)
}

/// `G`: last line, or line `N` when a count was typed.
pub(crate) fn goto_last_line(ed: &mut Editor, _count: usize) -> Deferred {
    let last = ed.doc().line_count() - 1;
    let row = ed.explicit_count().map_or(last, |n| n.saturating_sub(1));
    goto_line(ed, row)
}

fn goto_line(ed: &mut Editor, row: usize) -> Deferred {
    let row = row.min(ed.doc().line_count() - 1);
    let col = motion::first_non_blank(ed.doc().buffer(), row);
    *ed.cursor_mut() = Position::new(row, col);
    Deferred::None
}

#[cfg(test)]
mod tests {
    use crate::{Editor, EditorOptions, Mode, Position};

    fn editor_at(content: &str, row: usize, col: usize) -> Editor {
        let mut ed = Editor::new(EditorOptions::new().with_content(content));
        ed.set_cursor(Position::new(row, col));
        ed
    }

    fn run(ed: &mut Editor, key: &str, count: usize) -> Position {
        ed.invoke_binding(key, Mode::Normal, Some(count));
        ed.cursor()
    }

    fn run_plain(ed: &mut Editor, key: &str) -> Position {
        ed.invoke_binding(key, Mode::Normal, None);
        ed.cursor()
    }

    #[test]
    fn hjkl_respect_bounds() {
        let mut ed = editor_at("Line 1\nLine 2\nLine 3", 1, 2);
        assert_eq!(run(&mut ed, "h", 1), Position::new(1, 1));
        assert_eq!(run(&mut ed, "h", 5), Position::new(1, 0));
        assert_eq!(run(&mut ed, "l", 10), Position::new(1, 5));
        assert_eq!(run(&mut ed, "k", 1), Position::new(0, 5));
        assert_eq!(run(&mut ed, "j", 9), Position::new(2, 5));
    }

    #[test]
    fn line_start_and_end() {
        let mut ed = editor_at("Line 1\nLine 2\nLine 3", 1, 3);
        assert_eq!(run(&mut ed, "0", 1).col, 0);
        assert_eq!(run(&mut ed, "$", 1), Position::new(1, 5));
        assert_eq!(run(&mut ed, "$", 2), Position::new(2, 5));
    }

    #[test]
    fn caret_skips_indent() {
        let mut ed = editor_at("    indented", 0, 9);
        assert_eq!(run(&mut ed, "^", 1).col, 4);
    }

    #[test]
    fn space_wraps_to_next_line() {
        let mut ed = editor_at("Line 1\nLine 2\nLine 3", 0, 4);
        assert_eq!(run(&mut ed, " ", 1), Position::new(0, 5));
        assert_eq!(run(&mut ed, " ", 1), Position::new(1, 0));
    }

    #[test]
    fn space_stops_at_buffer_end() {
        let mut ed = editor_at("ab", 0, 0);
        assert_eq!(run(&mut ed, " ", 10), Position::new(0, 1));
    }

    #[test]
    fn word_motions() {
        let mut ed = editor_at("foo bar.baz qux", 0, 0);
        assert_eq!(run(&mut ed, "w", 1).col, 4);
        assert_eq!(run(&mut ed, "w", 2).col, 8);
        assert_eq!(run(&mut ed, "e", 1).col, 10);
        assert_eq!(run(&mut ed, "b", 3).col, 4);
    }

    #[test]
    fn gg_and_g_jump() {
        let mut ed = editor_at("Line 1\nLine 2\nLine 3\nLine 4\nLine 5", 3, 0);
        assert_eq!(run_plain(&mut ed, "gg").row, 0);
        assert_eq!(run_plain(&mut ed, "G").row, 4);
        assert_eq!(run(&mut ed, "gg", 3).row, 2);
        assert_eq!(run(&mut ed, "G", 2).row, 1);
        assert_eq!(run(&mut ed, "G", 99).row, 4);
    }
}
