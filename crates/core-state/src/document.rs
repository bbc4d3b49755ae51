//! `Document`: a `Buffer` paired with its undo history.
//!
//! Every mutating call records the edit with the history engine before
//! touching the buffer. Undo grouping is caller-controlled: call
//! `save_undo_state` once before a logical edit group; the buffer calls made
//! between two saves are undone together.

use core_text::{Buffer, Position};
use tracing::debug;

use crate::undo::{InsertRun, UndoEngine};

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryResult {
    pub success: bool,
    /// Cursor recorded with the restored snapshot (or the caller's cursor on failure).
    pub cursor: Position,
}

#[derive(Debug, Default)]
pub struct Document {
    buffer: Buffer,
    history: UndoEngine,
}

impl Document {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            history: UndoEngine::new(),
        }
    }

    pub fn from_text(content: &str) -> Self {
        Self::new(Buffer::from_text(content))
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }
    pub fn line(&self, row: usize) -> &str {
        self.buffer.line(row)
    }
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }
    pub fn line_len(&self, row: usize) -> usize {
        self.buffer.line_len(row)
    }
    pub fn visual_line_len(&self, row: usize) -> usize {
        self.buffer.visual_line_len(row)
    }
    pub fn get_range(&self, start: Position, end: Position) -> String {
        self.buffer.get_range(start, end)
    }

    pub fn insert_at(&mut self, row: usize, col: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        self.history.note_edit();
        self.buffer.insert_at(row, col, text);
    }

    pub fn delete_at(&mut self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) {
        self.history.note_edit();
        self.buffer.delete_at(start_row, start_col, end_row, end_col);
    }

    pub fn delete_range(&mut self, start: Position, end: Position) {
        self.history.note_edit();
        self.buffer.delete_range(start, end);
    }

    pub fn insert_line(&mut self, row: usize, text: &str) {
        self.history.note_edit();
        self.buffer.insert_line(row, text);
    }

    pub fn delete_line(&mut self, row: usize) -> String {
        self.history.note_edit();
        self.buffer.delete_line(row)
    }

    pub fn set_line(&mut self, row: usize, text: &str) {
        self.history.note_edit();
        self.buffer.set_line(row, text);
    }

    /// Reset to a single empty line. The prior content is saved first so the
    /// clear itself can be undone.
    pub fn clear(&mut self, cursor: Position) {
        self.save_undo_state(cursor);
        self.history.note_edit();
        self.buffer.clear();
    }

    /// Push the current content and `cursor` onto the undo stack.
    pub fn save_undo_state(&mut self, cursor: Position) {
        self.history.push_snapshot(cursor, &self.buffer);
    }

    pub fn undo(&mut self, cursor: Position) -> HistoryResult {
        let mut cursor = cursor;
        let success = self.history.undo(&mut cursor, &mut self.buffer);
        debug!(target: "state.undo", success, undo_depth = self.history.undo_depth(), "undo");
        HistoryResult { success, cursor }
    }

    pub fn redo(&mut self, cursor: Position) -> HistoryResult {
        let mut cursor = cursor;
        let success = self.history.redo(&mut cursor, &mut self.buffer);
        debug!(target: "state.undo", success, redo_depth = self.history.redo_depth(), "redo");
        HistoryResult { success, cursor }
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_depth() > 0
    }
    pub fn can_redo(&self) -> bool {
        self.history.redo_depth() > 0
    }
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Take the insert-session snapshot if this is the session's first edit.
    pub fn begin_insert_run(&mut self, cursor: Position) {
        self.history.begin_insert_coalescing(cursor, &self.buffer);
    }
    pub fn end_insert_run(&mut self) {
        self.history.end_insert_coalescing();
    }
    pub fn insert_run(&self) -> &InsertRun {
        self.history.insert_run()
    }

    /// Replace content wholesale and forget all history.
    pub fn replace(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.history.clear();
    }
}
