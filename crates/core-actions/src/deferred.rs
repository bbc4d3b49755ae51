//! Deferred actions returned by handlers and run by the host loop.

use crate::Editor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOp {
    Undo,
    Redo,
}

/// Result signal of an undo or redo; `success` is false when the stack was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOutcome {
    pub op: HistoryOp,
    pub success: bool,
}

/// Work a handler asks the host to perform on its next cycle.
///
/// The editor never runs these while dispatching a key; the host passes them
/// to [`Editor::run_deferred`]. Fire-once, synchronous when run.
#[derive(Default)]
pub enum Deferred {
    #[default]
    None,
    Quit,
    SetStatus(String),
    History(HistoryOp),
    /// Clear the buffer (undoable).
    Clear,
    /// Restore the editor to its constructed state.
    Reset,
    Batch(Vec<Deferred>),
    Custom(Box<dyn FnOnce(&mut Editor) -> Deferred>),
}

impl Deferred {
    pub fn custom(f: impl FnOnce(&mut Editor) -> Deferred + 'static) -> Self {
        Deferred::Custom(Box::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Deferred::None)
    }

    /// Combine two actions, dropping `None`s.
    pub fn then(self, next: Deferred) -> Deferred {
        match (self, next) {
            (Deferred::None, d) | (d, Deferred::None) => d,
            (Deferred::Batch(mut v), d) => {
                v.push(d);
                Deferred::Batch(v)
            }
            (a, b) => Deferred::Batch(vec![a, b]),
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::None => f.write_str("None"),
            Deferred::Quit => f.write_str("Quit"),
            Deferred::SetStatus(s) => f.debug_tuple("SetStatus").field(s).finish(),
            Deferred::History(op) => f.debug_tuple("History").field(op).finish(),
            Deferred::Clear => f.write_str("Clear"),
            Deferred::Reset => f.write_str("Reset"),
            Deferred::Batch(v) => f.debug_tuple("Batch").field(v).finish(),
            Deferred::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
