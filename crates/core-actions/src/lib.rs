//! Modal editing controller.
//!
//! [`Editor`] owns the document, the cursor and viewport, the mode, the
//! pending key sequence and count prefix, the selection anchor and the yank
//! register. Each input event is processed to completion before the next:
//!
//! 1. In Insert/Command mode, printable keys edit text or the command line
//!    directly; named and modified keys go through the binding registry.
//! 2. Otherwise digits accumulate a count, and the key token is appended to
//!    the pending sequence and resolved against the registry: a match runs
//!    its handler with the count, a strict prefix keeps buffering, anything
//!    else is discarded.
//! 3. Afterwards the cursor is re-clamped for the mode and scrolled into view.
//!
//! Handlers return a [`Deferred`] value for the host to run on its next cycle
//! via [`Editor::run_deferred`].

mod bindings;
mod buffer;
mod deferred;
mod dispatcher;
pub mod text_object;

pub use buffer::BufferHandle;
pub use deferred::{Deferred, HistoryOp, HistoryOutcome};
pub use dispatcher::command_parser::{CommandParser, ParsedCommand};
pub use dispatcher::{DispatchResult, Update};

pub use core_config::EditorOptions;
pub use core_events::{CommandEvent, Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
pub use core_model::{DisplayLine, LineHighlighter, PlainHighlighter, View};
pub use core_state::{Mode, Yank, YankHighlight, YankKind};
pub use core_text::Position;

use core_keymap::{BindingRegistry, CommandRegistry};
use core_model::{Blink, EditorModel};
use core_state::{Document, EditorState, SelectionKind};
use core_text::Buffer;
use std::rc::Rc;
use std::time::Instant;
use tracing::debug;

/// Rows taken by the status bar when it is enabled.
pub const STATUS_BAR_ROWS: u16 = 2;

/// Key binding handler; receives the resolved count (1 when none was typed).
pub type BindingHandler = Rc<dyn Fn(&mut Editor, usize) -> Deferred>;
/// Ex command handler; receives the whitespace-split arguments.
pub type CommandHandler = Rc<dyn Fn(&mut Editor, &[String]) -> Deferred>;
pub type Binding = core_keymap::Binding<Mode, BindingHandler>;

pub struct Editor {
    pub(crate) model: EditorModel,
    pub(crate) bindings: BindingRegistry<Mode, BindingHandler>,
    pub(crate) commands: CommandRegistry<CommandHandler>,
    pub(crate) pending: Vec<String>,
    pub(crate) count: Option<usize>,
    /// Count typed for the handler currently running, if any.
    pub(crate) active_count: Option<usize>,
    pub(crate) options: EditorOptions,
    pub(crate) blink: Blink,
}

impl Editor {
    pub fn new(options: EditorOptions) -> Self {
        let mut state = EditorState::new(Buffer::from_text(&options.content));
        state.file_name = options.file_name.clone();
        let mut editor = Self {
            model: EditorModel::new(state),
            bindings: BindingRegistry::new(),
            commands: CommandRegistry::new(),
            pending: Vec::new(),
            count: None,
            active_count: None,
            blink: Blink::new(options.blink_interval),
            options,
        };
        bindings::register_defaults(&mut editor);
        debug!(target: "actions.dispatch", bindings = editor.bindings.len(), commands = editor.commands.len(), "editor_created");
        editor
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // ---------------------------------------------------------------------------------------------
    // State access
    // ---------------------------------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.model.state().mode
    }

    /// Switch modes. Leaving Insert closes the insert undo group; entering a
    /// visual mode from a non-visual one anchors the selection at the cursor;
    /// leaving visual modes drops the anchor.
    pub fn set_mode(&mut self, mode: Mode) {
        let cursor = self.cursor();
        let state = self.model.state_mut();
        let old = state.mode;
        if old == mode {
            return;
        }
        if old == Mode::Insert || mode == Mode::Insert {
            state.document.end_insert_run();
        }
        if mode.is_visual() {
            if !old.is_visual() {
                state.selection.anchor = Some(cursor);
            }
        } else {
            state.selection.clear();
        }
        if old == Mode::Command {
            state.command_line.clear();
        }
        state.mode = mode;
        debug!(target: "actions.dispatch", from = %old, to = %mode, "mode_change");
        self.settle();
    }

    pub fn cursor(&self) -> Position {
        self.model.view().cursor
    }

    /// Move the cursor; it is clamped for the current mode and scrolled into view.
    pub fn set_cursor(&mut self, pos: Position) {
        self.model.view_mut().cursor = pos;
        self.settle();
    }

    pub fn view(&self) -> &View {
        self.model.view()
    }

    pub fn document(&self) -> &Document {
        &self.model.state().document
    }

    /// Read/write facade over the buffer.
    pub fn buffer(&mut self) -> BufferHandle<'_> {
        BufferHandle::new(self)
    }

    pub fn register(&self) -> Option<&Yank> {
        self.model.state().register.get()
    }

    pub fn yank_highlight(&self) -> Option<&YankHighlight> {
        self.model.state().yank_highlight.as_ref()
    }

    pub fn command_text(&self) -> &str {
        self.model.state().command_line.buffer()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.model.state().status_message.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.model.state().file_name.as_deref()
    }

    /// Count that the next command would receive.
    pub fn count_prefix(&self) -> usize {
        self.count.unwrap_or(1)
    }

    pub fn pending_keys(&self) -> &[String] {
        &self.pending
    }

    pub fn pending_sequence(&self) -> String {
        self.pending.concat()
    }

    pub fn cursor_visible(&self) -> bool {
        self.blink.visible()
    }

    /// Normalized `(start, end)` of the selection. Without an anchor both
    /// ends are the cursor. In VisualLine mode the span covers whole lines.
    pub fn selection_boundary(&self) -> (Position, Position) {
        let state = self.model.state();
        let cursor = self.cursor();
        let kind = if state.mode == Mode::VisualLine {
            SelectionKind::Linewise
        } else {
            SelectionKind::Characterwise
        };
        let Some(span) = state.selection.span(cursor, kind) else {
            return (cursor, cursor);
        };
        if span.is_linewise() {
            let buf = state.document.buffer();
            let end_len = buf.line_len(span.end.row);
            (
                Position::new(span.start.row, 0),
                Position::new(span.end.row, end_len.saturating_sub(1)),
            )
        } else {
            (span.start, span.end)
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------------------------------

    /// Register a key binding. A later binding for the same key and mode wins.
    pub fn add_binding<F>(&mut self, key: &str, mode: Mode, description: &str, handler: F)
    where
        F: Fn(&mut Editor, usize) -> Deferred + 'static,
    {
        self.bindings.add(key, mode, description, Rc::new(handler));
    }

    pub fn find_binding(&self, key: &str, mode: Mode) -> Option<&Binding> {
        self.bindings.find_exact(key, mode)
    }

    pub fn is_binding_prefix(&self, key: &str, mode: Mode) -> bool {
        self.bindings.is_prefix(key, mode)
    }

    /// All bindings for `mode`, in registration order.
    pub fn bindings_for_mode(&self, mode: Mode) -> Vec<&Binding> {
        self.bindings.get_for_mode(mode)
    }

    /// Run the handler bound to `key` in `mode` directly, bypassing the
    /// pending sequence, as if `count` had been typed before it. Returns
    /// `None` when nothing is bound.
    pub fn invoke_binding(&mut self, key: &str, mode: Mode, count: Option<usize>) -> Option<Deferred> {
        let handler = self.bindings.find_exact(key, mode)?.handler.clone();
        let deferred = self.run_handler(&handler, count);
        self.settle();
        Some(deferred)
    }

    pub fn add_command<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut Editor, &[String]) -> Deferred + 'static,
    {
        self.commands.register(name, Rc::new(handler));
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.get(name).is_some()
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.commands.names()
    }

    // ---------------------------------------------------------------------------------------------
    // Deferred-producing operations
    // ---------------------------------------------------------------------------------------------

    pub fn set_status_message(&self, text: impl Into<String>) -> Deferred {
        Deferred::SetStatus(text.into())
    }

    /// Restore the constructed content, cursor at origin, Normal mode, empty
    /// register. Repeatable.
    pub fn reset(&self) -> Deferred {
        Deferred::Reset
    }

    // ---------------------------------------------------------------------------------------------
    // Presentation
    // ---------------------------------------------------------------------------------------------

    /// `:cmd` in Command mode, else ` MODE[ | pending][ | message]`.
    pub fn status_text(&self) -> String {
        let state = self.model.state();
        if state.mode == Mode::Command {
            return format!(":{}", state.command_line.buffer());
        }
        let mut status = format!(" {}", state.mode);
        if !self.pending.is_empty() {
            status.push_str(" | ");
            status.push_str(&self.pending_sequence());
        }
        if let Some(msg) = &state.status_message
            && !msg.is_empty()
        {
            status.push_str(" | ");
            status.push_str(msg);
        }
        status
    }

    pub fn visible_lines(&self, highlighter: &dyn LineHighlighter) -> Vec<DisplayLine> {
        core_model::visible_lines(
            self.model.state().document.buffer(),
            self.model.view(),
            highlighter,
            self.options.relative_numbers,
            self.model.state().yank_highlight.as_ref(),
        )
    }

    /// Apply a terminal size. The status bar's rows are subtracted from the
    /// text height when it is enabled.
    pub fn resize(&mut self, width: u16, height: u16) {
        let text_height = if self.options.status_bar {
            height.saturating_sub(STATUS_BAR_ROWS)
        } else {
            height
        };
        self.model
            .view_mut()
            .set_size(width as usize, text_height as usize);
        debug!(target: "actions.dispatch", width, height, text_height, "resize");
        self.settle();
    }

    /// Advance blink and expire the yank highlight. Returns true on a visible change.
    pub fn tick(&mut self, now: Instant) -> bool {
        let blinked = self.blink.tick(now);
        let expired = self.model.state_mut().tick_yank_highlight(now);
        blinked || expired
    }

    // ---------------------------------------------------------------------------------------------
    // Internal helpers shared by handlers
    // ---------------------------------------------------------------------------------------------

    pub(crate) fn state_mut(&mut self) -> &mut EditorState {
        self.model.state_mut()
    }

    pub(crate) fn doc(&self) -> &Document {
        &self.model.state().document
    }

    pub(crate) fn doc_mut(&mut self) -> &mut Document {
        &mut self.model.state_mut().document
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Position {
        &mut self.model.view_mut().cursor
    }

    /// Count typed for the running handler, `None` when the user typed none.
    pub(crate) fn explicit_count(&self) -> Option<usize> {
        self.active_count
    }

    pub(crate) fn run_handler(&mut self, handler: &BindingHandler, count: Option<usize>) -> Deferred {
        self.active_count = count;
        let deferred = handler(self, count.unwrap_or(1).max(1));
        self.active_count = None;
        deferred
    }

    /// Re-clamp the cursor and keep it visible.
    pub(crate) fn settle(&mut self) {
        self.model.settle_cursor(self.options.scroll_margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(content: &str) -> Editor {
        Editor::new(EditorOptions::new().with_content(content))
    }

    #[test]
    fn construction_applies_options() {
        let ed = Editor::new(
            EditorOptions::new()
                .with_content("Test content")
                .with_file_name("test.go")
                .with_status_bar(false),
        );
        assert_eq!(ed.document().text(), "Test content");
        assert_eq!(ed.file_name(), Some("test.go"));
        assert_eq!(ed.mode(), Mode::Normal);
        assert!(!ed.options().status_bar);
        assert!(ed.cursor_visible());
    }

    #[test]
    fn set_mode_round_trip() {
        let mut ed = editor("");
        for mode in [Mode::Insert, Mode::Visual, Mode::Command, Mode::VisualLine, Mode::Normal] {
            ed.set_mode(mode);
            assert_eq!(ed.mode(), mode);
        }
    }

    #[test]
    fn entering_visual_anchors_at_cursor() {
        let mut ed = editor("Line 1\nLine 2\nLine 3");
        ed.set_cursor(Position::new(1, 2));
        ed.set_mode(Mode::Visual);
        ed.set_cursor(Position::new(0, 4));
        assert_eq!(
            ed.selection_boundary(),
            (Position::new(0, 4), Position::new(1, 2))
        );
        ed.set_mode(Mode::VisualLine);
        assert_eq!(
            ed.selection_boundary(),
            (Position::new(0, 0), Position::new(1, 5))
        );
        ed.set_mode(Mode::Normal);
        assert_eq!(
            ed.selection_boundary(),
            (Position::new(0, 4), Position::new(0, 4))
        );
    }

    #[test]
    fn set_cursor_clamps() {
        let mut ed = editor("abc\nde");
        ed.set_cursor(Position::new(9, 9));
        assert_eq!(ed.cursor(), Position::new(1, 1));
    }

    #[test]
    fn resize_subtracts_status_rows() {
        let mut ed = editor("");
        assert_eq!(ed.view().height, 0);
        ed.resize(80, 24);
        assert_eq!(ed.view().width, 80);
        assert_eq!(ed.view().height, 22);

        let mut bare = Editor::new(EditorOptions::new().with_status_bar(false));
        bare.resize(100, 50);
        assert_eq!(bare.view().height, 50);
    }

    #[test]
    fn status_text_shapes() {
        let mut ed = editor("abc");
        assert_eq!(ed.status_text(), " NORMAL");
        ed.pending.push("d".into());
        ed.state_mut().set_status("saved");
        assert_eq!(ed.status_text(), " NORMAL | d | saved");
        ed.pending.clear();
        ed.set_mode(Mode::Command);
        ed.state_mut().command_line.set("wq");
        assert_eq!(ed.status_text(), ":wq");
    }

    #[test]
    fn custom_binding_overrides_default() {
        let mut ed = editor("abc");
        let before = ed.bindings_for_mode(Mode::Normal).len();
        ed.add_binding("x", Mode::Normal, "custom", |_, _| Deferred::Quit);
        assert_eq!(ed.bindings_for_mode(Mode::Normal).len(), before);
        assert_eq!(ed.find_binding("x", Mode::Normal).unwrap().description, "custom");
        let d = ed.invoke_binding("x", Mode::Normal, None).unwrap();
        assert!(matches!(d, Deferred::Quit));
        assert_eq!(ed.document().text(), "abc");
    }

    #[test]
    fn tick_toggles_blink_after_interval() {
        let mut ed = Editor::new(
            EditorOptions::new().with_blink_interval(std::time::Duration::from_millis(10)),
        );
        let later = Instant::now() + std::time::Duration::from_secs(1);
        assert!(ed.tick(later));
        assert!(!ed.cursor_visible());
    }

    #[test]
    fn zero_blink_interval_keeps_cursor_visible() {
        let mut ed = Editor::new(EditorOptions::new().with_blink_interval(std::time::Duration::ZERO));
        let later = Instant::now() + std::time::Duration::from_secs(5);
        assert!(!ed.tick(later));
        assert!(ed.cursor_visible());
    }
}
