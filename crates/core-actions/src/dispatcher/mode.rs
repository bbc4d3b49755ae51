//! Mode transitions: insert entry points, visual toggles, command line entry.

use crate::{Deferred, Editor};
use core_state::Mode;
use core_text::Position;

pub(crate) fn insert(ed: &mut Editor, _count: usize) -> Deferred {
    ed.set_mode(Mode::Insert);
    Deferred::None
}

/// `a`: insert after the cursor char.
pub(crate) fn append(ed: &mut Editor, _count: usize) -> Deferred {
    let cursor = ed.cursor();
    let len = ed.doc().line_len(cursor.row);
    ed.set_mode(Mode::Insert);
    ed.cursor_mut().col = (cursor.col + 1).min(len);
    Deferred::None
}

/// `I`: insert at the start of the line.
pub(crate) fn insert_line_start(ed: &mut Editor, _count: usize) -> Deferred {
    ed.set_mode(Mode::Insert);
    ed.cursor_mut().col = 0;
    Deferred::None
}

/// `A`: insert at the end of the line.
pub(crate) fn append_line_end(ed: &mut Editor, _count: usize) -> Deferred {
    let len = ed.doc().line_len(ed.cursor().row);
    ed.set_mode(Mode::Insert);
    ed.cursor_mut().col = len;
    Deferred::None
}

/// `o`: open an empty line below and insert there.
pub(crate) fn open_below(ed: &mut Editor, _count: usize) -> Deferred {
    let row = ed.cursor().row + 1;
    open_line(ed, row)
}

/// `O`: open an empty line above and insert there.
pub(crate) fn open_above(ed: &mut Editor, _count: usize) -> Deferred {
    let row = ed.cursor().row;
    open_line(ed, row)
}

fn open_line(ed: &mut Editor, row: usize) -> Deferred {
    ed.set_mode(Mode::Insert);
    let cursor = ed.cursor();
    let doc = ed.doc_mut();
    doc.begin_insert_run(cursor);
    doc.insert_line(row, "");
    *ed.cursor_mut() = Position::new(row, 0);
    Deferred::None
}

/// `v`: enter characterwise Visual, leave it, or switch from VisualLine.
pub(crate) fn toggle_visual(ed: &mut Editor, _count: usize) -> Deferred {
    toggle(ed, Mode::Visual)
}

/// `V`: enter linewise Visual, leave it, or switch from Visual.
pub(crate) fn toggle_visual_line(ed: &mut Editor, _count: usize) -> Deferred {
    toggle(ed, Mode::VisualLine)
}

fn toggle(ed: &mut Editor, target: Mode) -> Deferred {
    let next = if ed.mode() == target { Mode::Normal } else { target };
    ed.set_mode(next);
    Deferred::None
}

/// `o` in Visual: move the cursor to the other end of the selection.
pub(crate) fn swap_anchor(ed: &mut Editor, _count: usize) -> Deferred {
    let cursor = ed.cursor();
    let Some(anchor) = ed.state_mut().selection.anchor.replace(cursor) else {
        return Deferred::None;
    };
    *ed.cursor_mut() = anchor;
    Deferred::None
}

/// Esc outside Insert/Command.
pub(crate) fn to_normal(ed: &mut Editor, _count: usize) -> Deferred {
    ed.set_mode(Mode::Normal);
    Deferred::None
}

/// `:`: open the command line.
pub(crate) fn command_line(ed: &mut Editor, _count: usize) -> Deferred {
    ed.state_mut().clear_status();
    ed.set_mode(Mode::Command);
    Deferred::None
}
