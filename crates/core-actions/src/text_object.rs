//! Text objects (`iw`, `aw`) and the operators that consume them.
//!
//! A text object resolves to a characterwise span on the cursor line. The
//! `d`, `c` and `y` operators take the span the same way their visual
//! counterparts take a selection.

use crate::dispatcher::edit::{flash, store};
use crate::{Deferred, Editor};
use core_state::{Mode, SelectionKind, SelectionSpan, Yank};
use core_text::motion::{CharClass, char_class, inner_word};
use core_text::{Buffer, Position};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObjectKind {
    /// The same-class run under the cursor (`iw`).
    WordInner,
    /// The run plus adjacent whitespace (`aw`).
    WordA,
}

pub trait TextObject {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;
    /// Span relative to `cursor`, or `None` when the object is empty.
    fn resolve(&self, buffer: &Buffer, cursor: Position) -> Option<SelectionSpan>;
}

impl TextObject for TextObjectKind {
    fn name(&self) -> &'static str {
        match self {
            TextObjectKind::WordInner => "inner-word",
            TextObjectKind::WordA => "a-word",
        }
    }

    fn resolve(&self, buffer: &Buffer, cursor: Position) -> Option<SelectionSpan> {
        let (start, end) = match self {
            TextObjectKind::WordInner => inner_word(buffer, cursor)?,
            TextObjectKind::WordA => a_word(buffer, cursor)?,
        };
        Some(SelectionSpan::new(
            Position::new(cursor.row, start),
            Position::new(cursor.row, end),
            SelectionKind::Characterwise,
        ))
    }
}

/// `aw`: on whitespace, the blanks plus the following word; on a word, the
/// word plus trailing blanks, or leading blanks when none trail.
fn a_word(buffer: &Buffer, cursor: Position) -> Option<(usize, usize)> {
    let (start, end) = inner_word(buffer, cursor)?;
    let chars: Vec<char> = buffer.line(cursor.row).chars().collect();
    let is_blank = |i: usize| char_class(chars[i]) == CharClass::Whitespace;
    if is_blank(start) {
        if end + 1 < chars.len() {
            let (_, word_end) = inner_word(buffer, Position::new(cursor.row, end + 1))?;
            return Some((start, word_end));
        }
        return Some((start, end));
    }
    let mut trail = end;
    while trail + 1 < chars.len() && is_blank(trail + 1) {
        trail += 1;
    }
    if trail > end {
        return Some((start, trail));
    }
    let mut lead = start;
    while lead > 0 && is_blank(lead - 1) {
        lead -= 1;
    }
    Some((lead, end))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectOperator {
    Delete,
    Change,
    Yank,
}

pub(crate) fn apply(ed: &mut Editor, op: ObjectOperator, kind: TextObjectKind) -> Deferred {
    let cursor = ed.cursor();
    let span = kind.resolve(ed.doc().buffer(), cursor);
    trace!(target: "actions.dispatch", object = kind.name(), op = ?op, found = span.is_some(), "text_object");
    if op == ObjectOperator::Change {
        ed.set_mode(Mode::Insert);
    }
    let Some(span) = span else {
        return Deferred::None;
    };
    let text = ed.doc().get_range(span.start, span.end);
    match op {
        ObjectOperator::Yank => {
            store(ed, Yank::characterwise(text));
            flash(ed, span.start, span.end, false);
        }
        ObjectOperator::Delete | ObjectOperator::Change => {
            let doc = ed.doc_mut();
            if op == ObjectOperator::Change {
                doc.begin_insert_run(cursor);
            } else {
                doc.save_undo_state(cursor);
            }
            doc.delete_range(span.start, span.end);
            store(ed, Yank::characterwise(text));
        }
    }
    *ed.cursor_mut() = span.start;
    Deferred::None
}
