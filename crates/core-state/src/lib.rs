//! Editor state: document, mode, selection anchor, yank register, command line
//! and transient status metadata.
//!
//! Undo logic lives in `undo::UndoEngine`, wrapped together with the buffer by
//! `document::Document` so every mutation is recorded with the history.
//!
//! Insert Coalescing:
//! - All text typed during one Insert session is captured by a *single* undo
//!   snapshot taken lazily at the first mutation of the session.
//! - The run ends when Insert mode is left; the next session starts a new run.
//!
//! Normal mode edits save one snapshot per command, including counted
//! commands such as `3dd`, so one `u` reverts the whole command.
//!
//! Cursor and viewport live in `core-model::View`; this crate stays
//! buffer-centric.

use std::fmt;
use std::time::{Duration, Instant};

use core_text::{Buffer, Position};

pub mod document;
pub mod undo;
pub use document::{Document, HistoryResult};
pub use undo::{InsertRun, UNDO_HISTORY_MAX};

/// Current editor mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys insert literal text at the cursor.
    Insert,
    /// Character-wise selection between the anchor and the cursor.
    Visual,
    /// Line-wise selection.
    VisualLine,
    /// An ex command line is being typed.
    Command,
}

impl Mode {
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine)
    }

    /// Label used by the status line.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
            Mode::VisualLine => "VISUAL LINE",
            Mode::Command => "COMMAND",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Characterwise,
    Linewise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub start: Position,
    pub end: Position,
    pub kind: SelectionKind,
}

impl SelectionSpan {
    /// Construct a span normalizing ordering so that start <= end (row, then column).
    pub fn new(a: Position, b: Position, kind: SelectionKind) -> Self {
        let (start, end) = Position::ordered(a, b);
        Self { start, end, kind }
    }

    pub fn is_linewise(&self) -> bool {
        self.kind == SelectionKind::Linewise
    }
}

/// Visual selection anchor. The span itself is derived from the anchor and
/// the cursor at query time, never stored.
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    pub anchor: Option<Position>,
}

impl SelectionModel {
    pub fn clear(&mut self) {
        self.anchor = None;
    }
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
    pub fn span(&self, cursor: Position, kind: SelectionKind) -> Option<SelectionSpan> {
        self.anchor.map(|a| SelectionSpan::new(a, cursor, kind))
    }
}

/// Shape of the text held in the yank register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YankKind {
    Characterwise,
    Linewise,
}

/// Register payload. Linewise text holds whole lines joined by `'\n'` with
/// no leading or trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Yank {
    pub kind: YankKind,
    pub text: String,
}

impl Yank {
    pub fn characterwise(text: impl Into<String>) -> Self {
        Self {
            kind: YankKind::Characterwise,
            text: text.into(),
        }
    }
    pub fn linewise(text: impl Into<String>) -> Self {
        Self {
            kind: YankKind::Linewise,
            text: text.into(),
        }
    }
}

/// The single unnamed register.
#[derive(Debug, Default, Clone)]
pub struct Register {
    slot: Option<Yank>,
}

impl Register {
    pub fn set(&mut self, yank: Yank) {
        tracing::debug!(target: "state.register", kind = ?yank.kind, len = yank.text.len(), "register_write");
        self.slot = Some(yank);
    }
    pub fn get(&self) -> Option<&Yank> {
        self.slot.as_ref()
    }
    pub fn clear(&mut self) {
        self.slot = None;
    }
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// Command-line text typed after `:` (the colon itself is not stored).
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    pub fn set(&mut self, text: impl Into<String>) {
        self.buf = text.into();
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Remove the last char. Returns false when there was nothing to remove.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop().is_some()
    }
    /// Take the typed text, leaving the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// Flash marking a just-yanked span until `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YankHighlight {
    pub start: Position,
    pub end: Position,
    pub linewise: bool,
    pub expires_at: Instant,
}

impl YankHighlight {
    pub fn new(start: Position, end: Position, linewise: bool, ttl: Duration) -> Self {
        let (start, end) = Position::ordered(start, end);
        Self {
            start,
            end,
            linewise,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn covers_row(&self, row: usize) -> bool {
        (self.start.row..=self.end.row).contains(&row)
    }

    /// Highlighted column span `[start, end)` for `row`, given that row's length.
    pub fn columns(&self, row: usize, line_len: usize) -> Option<(usize, usize)> {
        if !self.covers_row(row) {
            return None;
        }
        if self.linewise {
            return Some((0, line_len));
        }
        let start = if row == self.start.row { self.start.col } else { 0 };
        let end = if row == self.end.row {
            (self.end.col + 1).min(line_len)
        } else {
            line_len
        };
        Some((start.min(end), end))
    }
}

/// Top-level editor state container.
#[derive(Debug)]
pub struct EditorState {
    pub document: Document,
    pub mode: Mode,
    pub selection: SelectionModel,
    pub register: Register,
    pub command_line: CommandLineState,
    pub status_message: Option<String>,
    pub yank_highlight: Option<YankHighlight>,
    pub file_name: Option<String>,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            document: Document::new(buffer),
            mode: Mode::Normal,
            selection: SelectionModel::default(),
            register: Register::default(),
            command_line: CommandLineState::default(),
            status_message: None,
            yank_highlight: None,
            file_name: None,
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Expire the yank highlight; returns true if it was cleared.
    pub fn tick_yank_highlight(&mut self, now: Instant) -> bool {
        if let Some(h) = &self.yank_highlight
            && now >= h.expires_at
        {
            self.yank_highlight = None;
            return true;
        }
        false
    }
}
