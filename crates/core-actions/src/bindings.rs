//! Default key bindings and ex commands installed on every new editor.

use crate::dispatcher::{command, edit, mode, motion, undo, visual};
use crate::text_object::{self, ObjectOperator, TextObjectKind};
use crate::{Deferred, Editor};
use core_state::Mode;

type Handler = fn(&mut Editor, usize) -> Deferred;

/// Motions available in Normal, Visual and VisualLine.
const MOTIONS: &[(&str, &str, Handler)] = &[
    ("h", "Move left", motion::left),
    ("left", "Move left", motion::left),
    ("l", "Move right", motion::right),
    ("right", "Move right", motion::right),
    ("j", "Move down", motion::down),
    ("down", "Move down", motion::down),
    ("k", "Move up", motion::up),
    ("up", "Move up", motion::up),
    (" ", "Advance one character", motion::advance),
    ("w", "Next word", motion::word_forward),
    ("b", "Previous word", motion::word_backward),
    ("e", "End of word", motion::word_end),
    ("0", "Start of line", motion::line_start),
    ("^", "First non-blank", motion::first_non_blank),
    ("$", "End of line", motion::line_end),
    ("gg", "First line (or line N)", motion::goto_first_line),
    ("G", "Last line (or line N)", motion::goto_last_line),
];

const NORMAL: &[(&str, &str, Handler)] = &[
    ("i", "Insert before cursor", mode::insert),
    ("a", "Insert after cursor", mode::append),
    ("I", "Insert at line start", mode::insert_line_start),
    ("A", "Insert at line end", mode::append_line_end),
    ("o", "Open line below", mode::open_below),
    ("O", "Open line above", mode::open_above),
    ("v", "Visual mode", mode::toggle_visual),
    ("V", "Visual line mode", mode::toggle_visual_line),
    ("x", "Delete character", edit::delete_char),
    ("X", "Delete character before cursor", edit::delete_char_before),
    ("dd", "Delete line", edit::delete_lines),
    ("D", "Delete to end of line", edit::delete_to_line_end),
    ("dw", "Delete word", edit::delete_word),
    ("diw", "Delete inner word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Delete, TextObjectKind::WordInner)
    }),
    ("daw", "Delete a word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Delete, TextObjectKind::WordA)
    }),
    ("ciw", "Change inner word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Change, TextObjectKind::WordInner)
    }),
    ("caw", "Change a word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Change, TextObjectKind::WordA)
    }),
    ("yiw", "Yank inner word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Yank, TextObjectKind::WordInner)
    }),
    ("yaw", "Yank a word", |ed, _| {
        text_object::apply(ed, ObjectOperator::Yank, TextObjectKind::WordA)
    }),
    ("yy", "Yank line", edit::yank_lines),
    ("p", "Paste after", edit::paste_after),
    ("P", "Paste before", edit::paste_before),
    ("u", "Undo", undo::request_undo),
    ("ctrl+r", "Redo", undo::request_redo),
];

/// Shared by Visual and VisualLine.
const VISUAL: &[(&str, &str, Handler)] = &[
    ("o", "Swap selection ends", mode::swap_anchor),
    ("y", "Yank selection", visual::yank),
    ("d", "Delete selection", visual::delete),
    ("x", "Delete selection", visual::delete),
    ("c", "Change selection", visual::change),
    ("v", "Toggle visual mode", mode::toggle_visual),
    ("V", "Toggle visual line mode", mode::toggle_visual_line),
    ("esc", "Exit visual mode", mode::to_normal),
];

const INSERT: &[(&str, &str, Handler)] = &[
    ("enter", "New line", edit::insert_newline),
    ("backspace", "Delete backward", edit::insert_backspace),
    ("tab", "Insert tab", edit::insert_tab),
    ("esc", "Exit insert mode", edit::leave_insert),
    ("left", "Move left", motion::left),
    ("right", "Move right", motion::right),
    ("up", "Move up", motion::up),
    ("down", "Move down", motion::down),
];

const COMMAND: &[(&str, &str, Handler)] = &[
    ("enter", "Execute command", command::submit),
    ("esc", "Cancel command", command::cancel),
    ("backspace", "Delete backward", command::backspace),
];

fn register(editor: &mut Editor, mode: Mode, table: &[(&str, &str, Handler)]) {
    for &(key, description, handler) in table {
        editor.add_binding(key, mode, description, handler);
    }
}

pub(crate) fn register_defaults(editor: &mut Editor) {
    register(editor, Mode::Normal, MOTIONS);
    register(editor, Mode::Normal, NORMAL);
    if editor.options.command_mode {
        editor.add_binding(":", Mode::Normal, "Command mode", mode::command_line);
    }
    for visual_mode in [Mode::Visual, Mode::VisualLine] {
        register(editor, visual_mode, MOTIONS);
        register(editor, visual_mode, VISUAL);
    }
    register(editor, Mode::Insert, INSERT);
    register(editor, Mode::Command, COMMAND);

    editor.add_command("q", command::quit);
    editor.add_command("quit", command::quit);
}
