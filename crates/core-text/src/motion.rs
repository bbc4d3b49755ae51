//! Word-class motions over a `Buffer`.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor
//! state. A word is a maximal run of alphanumeric-or-underscore chars, or a
//! maximal run of other non-whitespace chars; whitespace separates words and
//! an empty line counts as a word of its own for `w`/`b`/`e`.

use crate::{Buffer, Position};

/// Character class used for word segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Word,
    Punct,
}

pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

fn line_chars(buf: &Buffer, row: usize) -> Vec<char> {
    buf.line(row).chars().collect()
}

/// Class at a position; positions past the end of a line read as whitespace
/// (the line break).
fn class_at(buf: &Buffer, pos: Position) -> CharClass {
    buf.line(pos.row)
        .chars()
        .nth(pos.col)
        .map_or(CharClass::Whitespace, char_class)
}

/// Step one char forward, treating the line break as a position. Returns
/// false at the end of the buffer.
fn step_forward(buf: &Buffer, pos: &mut Position) -> bool {
    let len = buf.line_len(pos.row);
    if pos.col < len {
        pos.col += 1;
        true
    } else if pos.row + 1 < buf.line_count() {
        pos.row += 1;
        pos.col = 0;
        true
    } else {
        false
    }
}

/// Step one char backward; entering the previous line lands on its break.
fn step_backward(buf: &Buffer, pos: &mut Position) -> bool {
    if pos.col > 0 {
        pos.col -= 1;
        true
    } else if pos.row > 0 {
        pos.row -= 1;
        pos.col = buf.line_len(pos.row);
        true
    } else {
        false
    }
}

fn is_empty_line(buf: &Buffer, row: usize) -> bool {
    buf.line(row).is_empty()
}

/// Move to the start of the next word (`w`). Stops at the last char of the
/// buffer when no further word exists.
pub fn word_forward(buf: &Buffer, pos: &mut Position) {
    let start = *pos;
    let mut cur = *pos;
    let class = class_at(buf, cur);
    if class != CharClass::Whitespace {
        while class_at(buf, cur) == class && cur.col < buf.line_len(cur.row) {
            cur.col += 1;
        }
    }
    loop {
        if cur != start && cur.col == 0 && is_empty_line(buf, cur.row) {
            break;
        }
        if class_at(buf, cur) != CharClass::Whitespace {
            break;
        }
        if !step_forward(buf, &mut cur) {
            cur.col = buf.line_len(cur.row).saturating_sub(1);
            break;
        }
    }
    *pos = cur;
}

/// Move to the start of the current or previous word (`b`).
pub fn word_backward(buf: &Buffer, pos: &mut Position) {
    let mut cur = *pos;
    if !step_backward(buf, &mut cur) {
        return;
    }
    while class_at(buf, cur) == CharClass::Whitespace {
        if cur.col == 0 && is_empty_line(buf, cur.row) {
            *pos = cur;
            return;
        }
        if !step_backward(buf, &mut cur) {
            *pos = Position::origin();
            return;
        }
    }
    let class = class_at(buf, cur);
    let chars = line_chars(buf, cur.row);
    while cur.col > 0 && char_class(chars[cur.col - 1]) == class {
        cur.col -= 1;
    }
    *pos = cur;
}

/// Move to the end of the current or next word (`e`).
pub fn word_end(buf: &Buffer, pos: &mut Position) {
    let mut cur = *pos;
    if !step_forward(buf, &mut cur) {
        return;
    }
    while class_at(buf, cur) == CharClass::Whitespace {
        if !step_forward(buf, &mut cur) {
            return;
        }
    }
    let class = class_at(buf, cur);
    let chars = line_chars(buf, cur.row);
    while cur.col + 1 < chars.len() && char_class(chars[cur.col + 1]) == class {
        cur.col += 1;
    }
    *pos = cur;
}

/// Column of the first non-whitespace char on `row` (0 for blank lines).
pub fn first_non_blank(buf: &Buffer, row: usize) -> usize {
    buf.line(row)
        .chars()
        .position(|c| !c.is_whitespace())
        .unwrap_or(0)
}

/// Inclusive column span of the same-class run under `pos` (`iw`). Returns
/// `None` on an empty line.
pub fn inner_word(buf: &Buffer, pos: Position) -> Option<(usize, usize)> {
    let chars = line_chars(buf, pos.row);
    if chars.is_empty() {
        return None;
    }
    let col = pos.col.min(chars.len() - 1);
    let class = char_class(chars[col]);
    let mut start = col;
    while start > 0 && char_class(chars[start - 1]) == class {
        start -= 1;
    }
    let mut end = col;
    while end + 1 < chars.len() && char_class(chars[end + 1]) == class {
        end += 1;
    }
    Some((start, end))
}
