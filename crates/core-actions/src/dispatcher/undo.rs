//! Undo / redo.
//!
//! The `u` and `ctrl+r` bindings only schedule history steps; the host runs
//! them through `Editor::run_deferred`, which calls into this module and
//! reports the outcome.

use crate::{Deferred, Editor, HistoryOp};
use tracing::trace;

pub(crate) fn request_undo(_ed: &mut Editor, count: usize) -> Deferred {
    repeated(HistoryOp::Undo, count)
}

pub(crate) fn request_redo(_ed: &mut Editor, count: usize) -> Deferred {
    repeated(HistoryOp::Redo, count)
}

fn repeated(op: HistoryOp, count: usize) -> Deferred {
    (0..count.max(1)).fold(Deferred::None, |acc, _| acc.then(Deferred::History(op)))
}

pub(crate) fn undo(ed: &mut Editor) -> bool {
    step(ed, HistoryOp::Undo)
}

pub(crate) fn redo(ed: &mut Editor) -> bool {
    step(ed, HistoryOp::Redo)
}

fn step(ed: &mut Editor, op: HistoryOp) -> bool {
    let cursor = ed.cursor();
    let doc = ed.doc_mut();
    let result = match op {
        HistoryOp::Undo => doc.undo(cursor),
        HistoryOp::Redo => doc.redo(cursor),
    };
    if result.success {
        *ed.cursor_mut() = result.cursor;
        ed.settle();
    }
    trace!(target: "actions.dispatch", op = ?op, success = result.success, "history");
    result.success
}

#[cfg(test)]
mod tests {
    use crate::{Deferred, Editor, EditorOptions, HistoryOp, Mode, Position};

    fn editor(content: &str) -> Editor {
        Editor::new(EditorOptions::new().with_content(content))
    }

    #[test]
    fn u_schedules_history_step() {
        let mut ed = editor("abc");
        let d = ed.invoke_binding("u", Mode::Normal, None).unwrap();
        assert!(matches!(d, Deferred::History(HistoryOp::Undo)));
        let d = ed.invoke_binding("ctrl+r", Mode::Normal, Some(3)).unwrap();
        match d {
            Deferred::Batch(steps) => assert_eq!(steps.len(), 3),
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn undo_restores_saved_cursor() {
        let mut ed = editor("one\ntwo");
        ed.set_cursor(Position::new(1, 2));
        ed.invoke_binding("dd", Mode::Normal, None);
        assert_eq!(ed.document().text(), "one");
        assert!(super::undo(&mut ed));
        assert_eq!(ed.document().text(), "one\ntwo");
        assert_eq!(ed.cursor(), Position::new(1, 2));
        assert!(super::redo(&mut ed));
        assert_eq!(ed.document().text(), "one");
        assert!(!super::redo(&mut ed));
    }
}
