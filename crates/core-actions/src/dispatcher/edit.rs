//! Text mutation, yank and paste.
//!
//! Normal-mode operators save one undo state before the whole counted
//! operation, so `3dd` undoes as a single step. Insert-mode edits share the
//! session snapshot taken lazily by `begin_insert_run`.

use crate::{Deferred, Editor};
use core_state::{Mode, Yank, YankHighlight, YankKind};
use core_text::{Position, motion};
use tracing::trace;

// -------------------------------------------------------------------------------------------------
// Insert mode
// -------------------------------------------------------------------------------------------------

fn insert_text(ed: &mut Editor, text: &str) {
    let cursor = ed.cursor();
    let doc = ed.doc_mut();
    doc.begin_insert_run(cursor);
    doc.insert_at(cursor.row, cursor.col, text);
}

pub(crate) fn insert_char(ed: &mut Editor, ch: char) {
    let mut buf = [0u8; 4];
    insert_text(ed, ch.encode_utf8(&mut buf));
    ed.cursor_mut().col += 1;
}

pub(crate) fn insert_tab(ed: &mut Editor, _count: usize) -> Deferred {
    insert_char(ed, '\t');
    Deferred::None
}

/// Enter: split the line at the cursor.
pub(crate) fn insert_newline(ed: &mut Editor, _count: usize) -> Deferred {
    insert_text(ed, "\n");
    let row = ed.cursor().row;
    *ed.cursor_mut() = Position::new(row + 1, 0);
    Deferred::None
}

/// Backspace: delete the char left of the cursor, or join with the previous
/// line from column 0.
pub(crate) fn insert_backspace(ed: &mut Editor, _count: usize) -> Deferred {
    let cursor = ed.cursor();
    if cursor.col > 0 {
        let doc = ed.doc_mut();
        doc.begin_insert_run(cursor);
        doc.delete_at(cursor.row, cursor.col - 1, cursor.row, cursor.col - 1);
        ed.cursor_mut().col -= 1;
    } else if cursor.row > 0 {
        let prev_len = ed.doc().line_len(cursor.row - 1);
        let doc = ed.doc_mut();
        doc.begin_insert_run(cursor);
        doc.delete_at(cursor.row - 1, prev_len, cursor.row, 0);
        *ed.cursor_mut() = Position::new(cursor.row - 1, prev_len);
    }
    Deferred::None
}

/// Esc from Insert: back to Normal with the cursor one column left.
pub(crate) fn leave_insert(ed: &mut Editor, _count: usize) -> Deferred {
    let col = ed.cursor().col;
    ed.set_mode(Mode::Normal);
    ed.cursor_mut().col = col.saturating_sub(1);
    Deferred::None
}

// -------------------------------------------------------------------------------------------------
// Register helpers
// -------------------------------------------------------------------------------------------------

pub(crate) fn store(ed: &mut Editor, yank: Yank) {
    ed.state_mut().register.set(yank);
}

/// Flash the yanked span when a highlight duration is configured.
pub(crate) fn flash(ed: &mut Editor, start: Position, end: Position, linewise: bool) {
    let ttl = ed.options.yank_highlight;
    if ttl.is_zero() {
        return;
    }
    ed.state_mut().yank_highlight = Some(YankHighlight::new(start, end, linewise, ttl));
}

fn joined_lines(ed: &Editor, first: usize, count: usize) -> String {
    ed.doc().lines()[first..first + count].join("\n")
}

// -------------------------------------------------------------------------------------------------
// Normal-mode operators
// -------------------------------------------------------------------------------------------------

/// `x`: delete `count` chars from the cursor.
pub(crate) fn delete_char(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor();
    let len = ed.doc().line_len(cursor.row);
    if len == 0 {
        return Deferred::None;
    }
    let end = (cursor.col + count - 1).min(len - 1);
    delete_span(ed, cursor.row, cursor.col, end);
    Deferred::None
}

/// `X`: delete `count` chars before the cursor.
pub(crate) fn delete_char_before(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor();
    if cursor.col == 0 {
        return Deferred::None;
    }
    let start = cursor.col.saturating_sub(count);
    delete_span(ed, cursor.row, start, cursor.col - 1);
    ed.cursor_mut().col = start;
    Deferred::None
}

/// `D`: delete from the cursor to the end of the line.
pub(crate) fn delete_to_line_end(ed: &mut Editor, _count: usize) -> Deferred {
    let cursor = ed.cursor();
    let len = ed.doc().line_len(cursor.row);
    if cursor.col < len {
        delete_span(ed, cursor.row, cursor.col, len - 1);
    }
    Deferred::None
}

/// Delete the inclusive column span on `row` into the register.
fn delete_span(ed: &mut Editor, row: usize, start: usize, end: usize) {
    let cursor = ed.cursor();
    let doc = ed.doc_mut();
    let text = doc.get_range(Position::new(row, start), Position::new(row, end));
    doc.save_undo_state(cursor);
    doc.delete_at(row, start, row, end);
    store(ed, Yank::characterwise(text));
}

/// `dd`: delete `count` lines into the register.
pub(crate) fn delete_lines(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor();
    let n = count.min(ed.doc().line_count() - cursor.row);
    let text = joined_lines(ed, cursor.row, n);
    let doc = ed.doc_mut();
    doc.save_undo_state(cursor);
    for _ in 0..n {
        doc.delete_line(cursor.row);
    }
    let row = cursor.row.min(doc.line_count() - 1);
    let col = motion::first_non_blank(doc.buffer(), row);
    store(ed, Yank::linewise(text));
    *ed.cursor_mut() = Position::new(row, col);
    trace!(target: "actions.dispatch", lines = n, "delete_lines");
    Deferred::None
}

/// `yy`: yank `count` lines.
pub(crate) fn yank_lines(ed: &mut Editor, count: usize) -> Deferred {
    let row = ed.cursor().row;
    let n = count.min(ed.doc().line_count() - row);
    let text = joined_lines(ed, row, n);
    store(ed, Yank::linewise(text));
    flash(ed, Position::new(row, 0), Position::new(row + n - 1, 0), true);
    Deferred::None
}

/// `dw`: delete up to the start of the `count`-th next word. When that word
/// starts on another line, or no further word exists, delete to end of line.
pub(crate) fn delete_word(ed: &mut Editor, count: usize) -> Deferred {
    let cursor = ed.cursor();
    let buf = ed.doc().buffer();
    let len = buf.line_len(cursor.row);
    if len == 0 {
        return Deferred::None;
    }
    let mut target = cursor;
    for _ in 0..count {
        motion::word_forward(buf, &mut target);
    }
    let chars: Vec<char> = buf.line(cursor.row).chars().collect();
    let at_word_start = target.row == cursor.row
        && target.col > cursor.col
        && target.col < len
        && !same_class(chars[target.col - 1], chars[target.col]);
    let end = if at_word_start { target.col - 1 } else { len - 1 };
    delete_span(ed, cursor.row, cursor.col, end);
    Deferred::None
}

fn same_class(a: char, b: char) -> bool {
    motion::char_class(a) == motion::char_class(b)
}

// -------------------------------------------------------------------------------------------------
// Paste
// -------------------------------------------------------------------------------------------------

pub(crate) fn paste_after(ed: &mut Editor, count: usize) -> Deferred {
    paste(ed, count, true);
    Deferred::None
}

pub(crate) fn paste_before(ed: &mut Editor, count: usize) -> Deferred {
    paste(ed, count, false);
    Deferred::None
}

fn paste(ed: &mut Editor, count: usize, after: bool) {
    let Some(yank) = ed.register().cloned() else {
        return;
    };
    let cursor = ed.cursor();
    match yank.kind {
        YankKind::Characterwise => {
            let text = yank.text.repeat(count);
            if text.is_empty() {
                return;
            }
            let len = ed.doc().line_len(cursor.row);
            let col = if after && len > 0 { cursor.col + 1 } else { cursor.col };
            let doc = ed.doc_mut();
            doc.save_undo_state(cursor);
            doc.insert_at(cursor.row, col, &text);
            let landing = if text.contains('\n') {
                col
            } else {
                col + text.chars().count() - 1
            };
            *ed.cursor_mut() = Position::new(cursor.row, landing);
        }
        YankKind::Linewise => {
            let first = if after { cursor.row + 1 } else { cursor.row };
            let doc = ed.doc_mut();
            doc.save_undo_state(cursor);
            let mut row = first;
            for _ in 0..count {
                for line in yank.text.split('\n') {
                    doc.insert_line(row, line);
                    row += 1;
                }
            }
            let col = motion::first_non_blank(doc.buffer(), first);
            *ed.cursor_mut() = Position::new(first, col);
        }
    }
    trace!(target: "actions.dispatch", kind = ?yank.kind, count, after, "paste");
}
