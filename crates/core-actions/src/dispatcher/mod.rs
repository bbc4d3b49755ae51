//! Event dispatch and deferred-action execution.
//!
//! Sub-modules hold the handler bodies the default bindings point at:
//! * `motion`  - cursor movement
//! * `mode`    - mode transitions
//! * `edit`    - text mutation, yank and paste
//! * `visual`  - selection operators
//! * `command` - command line editing and ex-command execution
//! * `undo`    - undo / redo

use crate::{Deferred, Editor, HistoryOp, HistoryOutcome};
use core_events::{CommandEvent, Event, InputEvent, KeyCode, KeyEvent};
use core_keymap::{Resolution, tokens_to_patterns};
use core_state::Mode;
use core_text::Buffer;
use std::time::Instant;
use tracing::{debug, trace};

pub(crate) mod command;
pub mod command_parser;
pub(crate) mod edit;
pub(crate) mod mode;
pub(crate) mod motion;
pub(crate) mod undo;
pub(crate) mod visual;

/// Largest count prefix accepted; further digits are ignored.
const MAX_COUNT: usize = 999_999;

/// Outcome of running deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// Set when an undo or redo ran.
    pub history: Option<HistoryOutcome>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            history: None,
        }
    }

    fn merge(&mut self, other: DispatchResult) {
        self.dirty |= other.dirty;
        self.quit |= other.quit;
        if other.history.is_some() {
            self.history = other.history;
        }
    }
}

/// Outcome of handling one event: whether a redraw is needed, plus deferred
/// work for the host's next cycle.
#[derive(Debug, Default)]
pub struct Update {
    pub dirty: bool,
    pub deferred: Deferred,
}

impl Update {
    fn dirty(deferred: Deferred) -> Self {
        Self {
            dirty: true,
            deferred,
        }
    }
}

impl Editor {
    /// Handle one event from the host queue.
    pub fn update(&mut self, event: Event) -> Update {
        match event {
            Event::Input(InputEvent::Key(key)) => self.handle_key(&key),
            Event::Input(InputEvent::Resize(w, h)) => {
                self.resize(w, h);
                Update::dirty(Deferred::None)
            }
            Event::Command(CommandEvent::Submitted { name, args }) => {
                let deferred = self.execute_command(&name, &args);
                self.settle();
                Update::dirty(deferred)
            }
            Event::Tick => Update {
                dirty: self.tick(Instant::now()),
                deferred: Deferred::None,
            },
            Event::Shutdown => Update::dirty(Deferred::Quit),
        }
    }

    /// Handle `event` and run its deferred work to completion, as a host loop would.
    pub fn process(&mut self, event: Event) -> DispatchResult {
        let update = self.update(event);
        let mut result = self.run_deferred(update.deferred);
        result.dirty |= update.dirty;
        result
    }

    /// Convenience over [`Editor::process`] for a single key.
    pub fn press(&mut self, key: KeyEvent) -> DispatchResult {
        self.process(Event::Input(InputEvent::Key(key)))
    }

    /// Run a deferred action (and any actions it yields).
    pub fn run_deferred(&mut self, deferred: Deferred) -> DispatchResult {
        let result = match deferred {
            Deferred::None => DispatchResult::clean(),
            Deferred::Quit => {
                debug!(target: "actions.dispatch", "quit");
                DispatchResult::quit()
            }
            Deferred::SetStatus(text) => {
                self.state_mut().set_status(text);
                DispatchResult::dirty()
            }
            Deferred::History(op) => {
                let success = match op {
                    HistoryOp::Undo => undo::undo(self),
                    HistoryOp::Redo => undo::redo(self),
                };
                DispatchResult {
                    dirty: success,
                    quit: false,
                    history: Some(HistoryOutcome { op, success }),
                }
            }
            Deferred::Clear => {
                let cursor = self.cursor();
                self.doc_mut().clear(cursor);
                DispatchResult::dirty()
            }
            Deferred::Reset => {
                self.reset_now();
                DispatchResult::dirty()
            }
            Deferred::Batch(items) => {
                let mut result = DispatchResult::clean();
                for item in items {
                    result.merge(self.run_deferred(item));
                }
                result
            }
            Deferred::Custom(f) => {
                let next = f(self);
                let mut result = DispatchResult::dirty();
                result.merge(self.run_deferred(next));
                result
            }
        };
        self.settle();
        result
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Update {
        self.blink.reset(Instant::now());
        let deferred = match self.mode() {
            Mode::Insert | Mode::Command => self.handle_literal_mode_key(key),
            Mode::Normal | Mode::Visual | Mode::VisualLine => self.handle_sequence_key(key),
        };
        self.settle();
        Update::dirty(deferred)
    }

    /// Insert/Command: printable keys are literal text; other keys resolve
    /// as single-key bindings.
    fn handle_literal_mode_key(&mut self, key: &KeyEvent) -> Deferred {
        let mode = self.mode();
        if let Some(ch) = key.printable() {
            match mode {
                Mode::Insert => edit::insert_char(self, ch),
                _ => command::push_char(self, ch),
            }
            return Deferred::None;
        }
        let token = key.token();
        if let Some(binding) = self.bindings.find_exact(&token, mode) {
            let handler = binding.handler.clone();
            trace!(target: "actions.dispatch", mode = %mode, key = %token, "literal_mode_binding");
            return self.run_handler(&handler, None);
        }
        if key.code == KeyCode::Esc {
            self.set_mode(Mode::Normal);
        }
        Deferred::None
    }

    /// Normal/Visual: count prefix, then pending-sequence resolution.
    fn handle_sequence_key(&mut self, key: &KeyEvent) -> Deferred {
        if key.code == KeyCode::Esc && (!self.pending.is_empty() || self.count.is_some()) {
            trace!(target: "actions.dispatch", pending = %self.pending_sequence(), "sequence_cancelled");
            self.clear_pending();
            return Deferred::None;
        }
        if self.pending.is_empty()
            && let Some(digit) = key.printable().and_then(|c| c.to_digit(10))
            && (digit != 0 || self.count.is_some())
        {
            let next = self.count.unwrap_or(0).saturating_mul(10) + digit as usize;
            self.count = Some(next.min(MAX_COUNT));
            trace!(target: "actions.dispatch", count = self.count_prefix(), "count_prefix");
            return Deferred::None;
        }

        let mode = self.mode();
        self.pending.push(key.token());
        let patterns = tokens_to_patterns(&self.pending);
        let handler = match self.bindings.resolve(&patterns, mode) {
            Resolution::Matched(binding) => binding.handler.clone(),
            Resolution::NeedMore => {
                trace!(target: "actions.dispatch", pending = %self.pending_sequence(), "sequence_pending");
                return Deferred::None;
            }
            Resolution::NoMatch => {
                trace!(target: "actions.dispatch", pending = %self.pending_sequence(), "sequence_discarded");
                self.clear_pending();
                return Deferred::None;
            }
        };
        let sequence = self.pending_sequence();
        let count = self.count.take();
        self.pending.clear();
        debug!(target: "actions.dispatch", mode = %mode, sequence = %sequence, count = count.unwrap_or(1), "binding_matched");
        self.run_handler(&handler, count)
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
        self.count = None;
    }

    /// Restore the constructed state. Bindings and commands are kept.
    pub(crate) fn reset_now(&mut self) {
        let content = self.options.content.clone();
        self.set_mode(Mode::Normal);
        let state = self.state_mut();
        state.document.replace(Buffer::from_text(&content));
        state.register.clear();
        state.selection.clear();
        state.command_line.clear();
        state.clear_status();
        state.yank_highlight = None;
        self.clear_pending();
        let view = self.model.view_mut();
        view.cursor = core_text::Position::origin();
        view.viewport_first_line = 0;
        debug!(target: "actions.dispatch", "reset");
    }
}
