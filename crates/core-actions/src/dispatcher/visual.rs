//! Operators applied to the Visual / VisualLine selection.
//!
//! Every operator ends the visual mode and drops the anchor.

use super::edit::{flash, store};
use crate::{Deferred, Editor};
use core_state::{Mode, Yank};
use core_text::{Position, motion};
use tracing::trace;

struct Selection {
    start: Position,
    end: Position,
    linewise: bool,
}

impl Selection {
    fn current(ed: &Editor) -> Self {
        let (start, end) = ed.selection_boundary();
        Self {
            start,
            end,
            linewise: ed.mode() == Mode::VisualLine,
        }
    }

    fn line_count(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    fn yank(&self, ed: &Editor) -> Yank {
        let doc = ed.doc();
        if self.linewise {
            Yank::linewise(doc.lines()[self.start.row..=self.end.row].join("\n"))
        } else {
            Yank::characterwise(doc.get_range(self.start, self.end))
        }
    }
}

/// `y`: copy the selection and return to Normal at its start.
pub(crate) fn yank(ed: &mut Editor, _count: usize) -> Deferred {
    let sel = Selection::current(ed);
    let yank = sel.yank(ed);
    trace!(target: "actions.dispatch", linewise = sel.linewise, len = yank.text.len(), "visual_yank");
    store(ed, yank);
    flash(ed, sel.start, sel.end, sel.linewise);
    ed.set_mode(Mode::Normal);
    *ed.cursor_mut() = sel.start;
    Deferred::None
}

/// `d` / `x`: delete the selection into the register.
pub(crate) fn delete(ed: &mut Editor, _count: usize) -> Deferred {
    let sel = Selection::current(ed);
    let yank = sel.yank(ed);
    let cursor = ed.cursor();
    let doc = ed.doc_mut();
    doc.save_undo_state(cursor);
    let landing = if sel.linewise {
        for _ in 0..sel.line_count() {
            doc.delete_line(sel.start.row);
        }
        let row = sel.start.row.min(doc.line_count() - 1);
        Position::new(row, motion::first_non_blank(doc.buffer(), row))
    } else {
        doc.delete_range(sel.start, sel.end);
        sel.start
    };
    store(ed, yank);
    ed.set_mode(Mode::Normal);
    *ed.cursor_mut() = landing;
    Deferred::None
}

/// `c`: replace the selection, continuing in Insert mode. The deletion and
/// the text typed afterwards undo together. Linewise change leaves one
/// empty line in place of the selected lines.
pub(crate) fn change(ed: &mut Editor, _count: usize) -> Deferred {
    let sel = Selection::current(ed);
    let yank = sel.yank(ed);
    let cursor = ed.cursor();
    ed.set_mode(Mode::Insert);
    let doc = ed.doc_mut();
    doc.begin_insert_run(cursor);
    let landing = if sel.linewise {
        for _ in 1..sel.line_count() {
            doc.delete_line(sel.start.row + 1);
        }
        doc.set_line(sel.start.row, "");
        Position::new(sel.start.row, 0)
    } else {
        doc.delete_range(sel.start, sel.end);
        sel.start
    };
    store(ed, yank);
    *ed.cursor_mut() = landing;
    Deferred::None
}
