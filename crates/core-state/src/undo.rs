use core_text::{Buffer, Position};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// A full-state snapshot for undo/redo.
#[derive(Debug, Clone)]
pub struct EditSnapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
    /// Content hash of the lines at capture time.
    pub hash: u64,
}

impl EditSnapshot {
    fn capture(buffer: &Buffer, cursor: Position) -> Self {
        Self {
            lines: buffer.lines().to_vec(),
            cursor,
            hash: buffer_hash(buffer),
        }
    }
}

/// Insert run state tracking. One run spans one Insert session.
#[derive(Debug, Clone)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

/// Linear undo/redo history.
///
/// Saving a snapshot never touches the redo stack; `note_edit` clears it once
/// a mutation actually happens, so a save followed by no edit keeps redo
/// history intact.
#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    insert_run: InsertRun,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> &InsertRun {
        &self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    pub fn push_snapshot(&mut self, cursor: Position, buffer: &Buffer) {
        let snap = EditSnapshot::capture(buffer, cursor);
        if let Some(last) = self.undo_stack.last_mut()
            && last.hash == snap.hash
            && last.lines == snap.lines
        {
            // Same content: keep one entry but remember the latest cursor.
            last.cursor = snap.cursor;
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), hash = snap.hash, "snapshot_dedupe_skip");
            return;
        }
        let lines = snap.lines.len();
        let hash = snap.hash;
        self.undo_stack.push(snap);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), lines, hash, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
    }

    /// Record that the buffer is about to change. Drops redo history.
    pub fn note_edit(&mut self) {
        if let InsertRun::Active { edits } = &mut self.insert_run {
            *edits += 1;
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Snapshot lazily at the first edit of an insert run; later calls in the
    /// same run are no-ops.
    pub fn begin_insert_coalescing(&mut self, cursor: Position, buffer: &Buffer) {
        if let InsertRun::Inactive = self.insert_run {
            self.push_snapshot(cursor, buffer);
            self.insert_run = InsertRun::Active { edits: 0 };
        }
    }

    pub fn end_insert_coalescing(&mut self) {
        if let InsertRun::Active { edits } = self.insert_run {
            trace!(target: "state.undo", edits, "insert_run_end");
        }
        self.insert_run = InsertRun::Inactive;
    }

    pub fn undo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        self.redo_stack.push(EditSnapshot::capture(buffer, *cursor));
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
        buffer.replace_lines(last.lines);
        *cursor = last.cursor;
        true
    }

    pub fn redo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        self.undo_stack.push(EditSnapshot::capture(buffer, *cursor));
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_push_from_redo");
        buffer.replace_lines(next.lines);
        *cursor = next.cursor;
        true
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.insert_run = InsertRun::Inactive;
    }
}

fn buffer_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    for line in buf.lines() {
        h.write(line.as_bytes());
        h.write_u8(b'\n');
    }
    h.finish()
}
