//! Command line editing and ex-command execution.
//!
//! Submitting always returns to Normal mode, whether the command ran, was
//! blank, or is unknown. Unknown names surface as a status message.

use super::command_parser::{CommandParser, ParsedCommand};
use crate::{Deferred, Editor};
use core_state::Mode;
use tracing::{debug, info};

pub(crate) fn push_char(ed: &mut Editor, ch: char) {
    ed.state_mut().command_line.push_char(ch);
}

/// Backspace; on an empty line it leaves Command mode.
pub(crate) fn backspace(ed: &mut Editor, _count: usize) -> Deferred {
    if !ed.state_mut().command_line.backspace() {
        ed.set_mode(Mode::Normal);
    }
    Deferred::None
}

pub(crate) fn cancel(ed: &mut Editor, _count: usize) -> Deferred {
    ed.set_mode(Mode::Normal);
    Deferred::None
}

/// Enter: run the typed command.
pub(crate) fn submit(ed: &mut Editor, _count: usize) -> Deferred {
    let raw = ed.state_mut().command_line.take();
    ed.set_mode(Mode::Normal);
    match CommandParser::parse(&raw) {
        ParsedCommand::Empty => Deferred::None,
        ParsedCommand::Named { name, args } => ed.execute_command(&name, &args),
    }
}

pub(crate) fn quit(_ed: &mut Editor, _args: &[String]) -> Deferred {
    Deferred::Quit
}

impl Editor {
    /// Look up and run a registered ex command. Unknown names set the
    /// status message instead. Leaves Command mode either way.
    pub fn execute_command(&mut self, name: &str, args: &[String]) -> Deferred {
        if self.mode() == Mode::Command {
            self.set_mode(Mode::Normal);
        }
        let Some(handler) = self.commands.get(name).cloned() else {
            info!(target: "actions.command", name, "unknown_command");
            self.state_mut().set_status(format!("Unknown command: {name}"));
            return Deferred::None;
        };
        debug!(target: "actions.command", name, args = args.len(), "execute_command");
        handler(self, args)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Deferred, Editor, EditorOptions, KeyCode, KeyEvent, Mode};
    use std::cell::Cell;
    use std::rc::Rc;

    fn type_line(ed: &mut Editor, text: &str) {
        ed.press(KeyEvent::char(':'));
        for c in text.chars() {
            ed.press(KeyEvent::char(c));
        }
    }

    #[test]
    fn typed_text_shows_in_status() {
        let mut ed = Editor::new(EditorOptions::new());
        type_line(&mut ed, "wq");
        assert_eq!(ed.mode(), Mode::Command);
        assert_eq!(ed.command_text(), "wq");
        assert_eq!(ed.status_text(), ":wq");
    }

    #[test]
    fn enter_runs_registered_command() {
        let mut ed = Editor::new(EditorOptions::new());
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        ed.add_command("test", move |_, args| {
            assert_eq!(args, ["a".to_string(), "b".to_string()]);
            seen.set(seen.get() + 1);
            Deferred::None
        });
        type_line(&mut ed, "test a b");
        ed.press(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(hits.get(), 1);
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.command_text(), "");
    }

    #[test]
    fn unknown_command_sets_status() {
        let mut ed = Editor::new(EditorOptions::new());
        type_line(&mut ed, "nope");
        let res = ed.press(KeyEvent::plain(KeyCode::Enter));
        assert!(!res.quit);
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.status_message(), Some("Unknown command: nope"));
        assert_eq!(ed.status_text(), " NORMAL | Unknown command: nope");
    }

    #[test]
    fn quit_commands() {
        for name in ["q", "quit"] {
            let mut ed = Editor::new(EditorOptions::new());
            type_line(&mut ed, name);
            assert!(ed.press(KeyEvent::plain(KeyCode::Enter)).quit);
        }
    }

    #[test]
    fn backspace_and_escape() {
        let mut ed = Editor::new(EditorOptions::new());
        type_line(&mut ed, "ab");
        ed.press(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(ed.command_text(), "a");
        ed.press(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(ed.mode(), Mode::Command);
        ed.press(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(ed.mode(), Mode::Normal);

        type_line(&mut ed, "xyz");
        ed.press(KeyEvent::plain(KeyCode::Esc));
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.command_text(), "");
    }

    #[test]
    fn blank_submit_is_noop() {
        let mut ed = Editor::new(EditorOptions::new());
        type_line(&mut ed, "  ");
        let res = ed.press(KeyEvent::plain(KeyCode::Enter));
        assert!(!res.quit);
        assert_eq!(ed.status_message(), None);
        assert_eq!(ed.mode(), Mode::Normal);
    }
}
