//! Presentation state layered over [`EditorState`]: the cursor, the vertical
//! viewport, cursor blink, and the renderer-facing line projection.
//!
//! Invariants (must hold after every dispatched key):
//! * the cursor row names an existing line;
//! * the cursor column rests on a character in Normal/Visual modes and may
//!   sit one past the end in Insert mode; an empty line always yields col 0;
//! * when the viewport has a height, the cursor row lies inside
//!   `[viewport_first_line, viewport_first_line + height)`.
//!
//! Rendering itself is the host's job. It reads [`visible_lines`] and styles
//! each line through an injected [`LineHighlighter`].

mod blink;
mod display;

pub use blink::Blink;
pub use display::{DisplayLine, LineHighlighter, PlainHighlighter, visible_lines};

use core_state::{EditorState, Mode};
use core_text::{Buffer, Position};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub cursor: Position,
    pub viewport_first_line: usize,
    pub width: usize,
    /// Text rows available; excludes the status bar.
    pub height: usize,
}

impl View {
    pub fn new(cursor: Position, viewport_first_line: usize) -> Self {
        Self {
            cursor,
            viewport_first_line,
            width: 0,
            height: 0,
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Rows `[first, first + height)`; may extend past the buffer end.
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        self.viewport_first_line..self.viewport_first_line + self.height
    }

    /// Re-clamp the cursor for `mode`. Returns true if it moved.
    pub fn clamp_cursor(&mut self, buffer: &Buffer, mode: Mode) -> bool {
        let clamped = clamp_position(buffer, self.cursor, mode);
        let moved = clamped != self.cursor;
        if moved {
            trace!(target: "model.view", from_row = self.cursor.row, from_col = self.cursor.col, row = clamped.row, col = clamped.col, "cursor_clamped");
            self.cursor = clamped;
        }
        moved
    }

    /// Scroll so the cursor row is visible in a buffer of `line_count` lines.
    /// Returns true if the first visible line changed.
    pub fn auto_scroll(&mut self, line_count: usize, margin: usize) -> bool {
        match scroll_target(self.viewport_first_line, self.cursor.row, line_count, self.height, margin) {
            Some(new_first) => {
                trace!(target: "model.view", from = self.viewport_first_line, to = new_first, "viewport_scrolled");
                self.viewport_first_line = new_first;
                true
            }
            None => false,
        }
    }
}

/// Clamp `pos` to a valid cursor location for `mode`.
///
/// Rows clamp to `[0, line_count - 1]`. Columns clamp to the last character
/// in Normal and Visual modes and to one past it in Insert and Command modes.
pub fn clamp_position(buffer: &Buffer, pos: Position, mode: Mode) -> Position {
    let row = pos.row.min(buffer.line_count().saturating_sub(1));
    let len = buffer.line_len(row);
    let max_col = match mode {
        Mode::Insert | Mode::Command => len,
        Mode::Normal | Mode::Visual | Mode::VisualLine => len.saturating_sub(1),
    };
    Position::new(row, pos.col.min(max_col))
}

/// First visible line that keeps `cursor_row` on screen with `margin` rows
/// of context above and below. `None` when `first` already does.
///
/// The margin is capped so the band around the cursor fits in `height`.
/// The viewport never starts past `line_count - height`, so near the end of
/// the buffer the bottom margin gives way and the last line sits on the last
/// text row. A viewport left hanging past the end after lines were deleted
/// is pulled back the same way.
pub fn scroll_target(
    first: usize,
    cursor_row: usize,
    line_count: usize,
    height: usize,
    margin: usize,
) -> Option<usize> {
    if height == 0 {
        return None;
    }
    let margin = margin.min(height.saturating_sub(1) / 2);
    let lowest = (cursor_row + margin + 1).saturating_sub(height);
    let highest = cursor_row.saturating_sub(margin);
    let last_first = line_count.max(cursor_row + 1).saturating_sub(height);
    let target = first.clamp(lowest, highest).min(last_first);
    (target != first).then_some(target)
}

/// Editor state plus its single view.
#[derive(Debug)]
pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            view: View::default(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable access to the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Clamp the cursor for the current mode, then scroll it into view.
    pub fn settle_cursor(&mut self, margin: usize) {
        let (state, view) = self.split_state_and_view();
        let buffer = state.document.buffer();
        view.clamp_cursor(buffer, state.mode);
        view.auto_scroll(buffer.line_count(), margin);
    }
}
