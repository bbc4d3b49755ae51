//! Buffer facade handed to host and extension code.
//!
//! Every mutating call is its own undo group: the current content is saved
//! before the edit and the cursor is re-clamped afterwards.

use crate::{Deferred, Editor, HistoryOp};
use core_text::Position;

pub struct BufferHandle<'a> {
    editor: &'a mut Editor,
}

impl<'a> BufferHandle<'a> {
    pub(crate) fn new(editor: &'a mut Editor) -> Self {
        Self { editor }
    }

    pub fn text(&self) -> String {
        self.editor.doc().text()
    }

    pub fn line_count(&self) -> usize {
        self.editor.doc().line_count()
    }

    /// Panics when `row` is out of range.
    pub fn line(&self, row: usize) -> &str {
        self.editor.doc().line(row)
    }

    pub fn lines(&self) -> Vec<String> {
        self.editor.doc().lines().to_vec()
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.editor.doc().line_len(row)
    }

    pub fn visual_line_len(&self, row: usize) -> usize {
        self.editor.doc().visual_line_len(row)
    }

    pub fn get_range(&self, start: Position, end: Position) -> String {
        self.editor.doc().get_range(start, end)
    }

    pub fn insert_at(&mut self, row: usize, col: usize, text: &str) {
        let cursor = self.editor.cursor();
        let doc = self.editor.doc_mut();
        doc.save_undo_state(cursor);
        doc.insert_at(row, col, text);
        self.editor.settle();
    }

    pub fn delete_at(&mut self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) {
        let cursor = self.editor.cursor();
        let doc = self.editor.doc_mut();
        doc.save_undo_state(cursor);
        doc.delete_at(start_row, start_col, end_row, end_col);
        self.editor.settle();
    }

    pub fn insert_line(&mut self, row: usize, text: &str) {
        let cursor = self.editor.cursor();
        let doc = self.editor.doc_mut();
        doc.save_undo_state(cursor);
        doc.insert_line(row, text);
        self.editor.settle();
    }

    pub fn delete_line(&mut self, row: usize) -> String {
        let cursor = self.editor.cursor();
        let doc = self.editor.doc_mut();
        doc.save_undo_state(cursor);
        let removed = doc.delete_line(row);
        self.editor.settle();
        removed
    }

    pub fn set_line(&mut self, row: usize, text: &str) {
        let cursor = self.editor.cursor();
        let doc = self.editor.doc_mut();
        doc.save_undo_state(cursor);
        doc.set_line(row, text);
        self.editor.settle();
    }

    /// Push the current content and cursor as an undo point.
    pub fn save_undo_state(&mut self) {
        let cursor = self.editor.cursor();
        self.editor.doc_mut().save_undo_state(cursor);
    }

    pub fn can_undo(&self) -> bool {
        self.editor.doc().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.doc().can_redo()
    }

    pub fn undo(&self) -> Deferred {
        Deferred::History(HistoryOp::Undo)
    }

    pub fn redo(&self) -> Deferred {
        Deferred::History(HistoryOp::Redo)
    }

    pub fn clear(&self) -> Deferred {
        Deferred::Clear
    }
}
