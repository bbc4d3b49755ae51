mod common;
use common::*;

use core_actions::{
    DisplayLine, Editor, EditorOptions, Event, HistoryOp, HistoryOutcome, InputEvent, Mode,
    PlainHighlighter, Position,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

#[test]
fn buffer_facade_round_trip() {
    let mut ed = editor("Initial content");
    let mut buf = ed.buffer();
    buf.insert_at(0, 7, " modified");
    assert_eq!(buf.text(), "Initial modified content");
    buf.delete_at(0, 7, 0, 15);
    assert_eq!(buf.text(), "Initial content");
    assert_eq!(buf.lines(), vec!["Initial content".to_string()]);
    assert_eq!(buf.line_len(0), 15);
}

#[test]
fn facade_edits_undo_without_explicit_save() {
    let mut ed = editor("First line\nSecond line\nThird line");
    ed.buffer().insert_at(0, 0, "Test ");
    let undo = ed.buffer().undo();
    let res = ed.run_deferred(undo);
    assert_eq!(
        res.history,
        Some(HistoryOutcome { op: HistoryOp::Undo, success: true })
    );
    assert_eq!(text(&ed), "First line\nSecond line\nThird line");
    assert!(ed.buffer().can_redo());
    let redo = ed.buffer().redo();
    ed.run_deferred(redo);
    assert_eq!(text(&ed), "Test First line\nSecond line\nThird line");
}

#[test]
fn save_alone_keeps_redo_history() {
    let mut ed = editor("abc");
    ed.buffer().insert_at(0, 3, "d");
    let undo = ed.buffer().undo();
    ed.run_deferred(undo);
    ed.buffer().save_undo_state();
    assert!(ed.buffer().can_redo());
    ed.buffer().insert_at(0, 0, "z");
    assert!(!ed.buffer().can_redo());
}

#[test]
fn clear_then_undo() {
    let mut ed = editor_at("one\ntwo", 1, 2);
    let clear = ed.buffer().clear();
    ed.run_deferred(clear);
    assert_eq!(text(&ed), "");
    assert_eq!(ed.cursor(), Position::origin());
    let undo = ed.buffer().undo();
    ed.run_deferred(undo);
    assert_eq!(text(&ed), "one\ntwo");
}

#[test]
fn cursor_clamps_after_facade_shrinks_buffer() {
    let mut ed = editor_at("line one\nline two", 1, 6);
    ed.buffer().delete_line(1);
    assert_eq!(ed.cursor(), Position::new(0, 6));
    ed.buffer().delete_at(0, 2, 0, 7);
    assert_eq!(ed.cursor(), Position::new(0, 1));
}

#[test]
fn status_message_is_deferred() {
    let mut ed = editor("");
    let action = ed.set_status_message("Test status message");
    assert_eq!(ed.status_message(), None);
    ed.run_deferred(action);
    assert_eq!(ed.status_message(), Some("Test status message"));
}

#[test]
fn reset_is_repeatable() {
    let mut ed = editor("Line 1\nLine 2\nLine 3");
    keys(&mut ed, "jddyyvl");
    for _ in 0..3 {
        let reset = ed.reset();
        ed.run_deferred(reset);
        assert_eq!(text(&ed), "Line 1\nLine 2\nLine 3");
        assert_eq!(ed.cursor(), Position::origin());
        assert_eq!(ed.mode(), Mode::Normal);
        assert!(ed.register().is_none());
        assert!(ed.pending_keys().is_empty());
    }
}

#[test]
fn resize_event_reserves_status_rows() {
    let mut ed = editor("");
    assert_eq!((ed.view().width, ed.view().height), (0, 0));
    ed.process(Event::Input(InputEvent::Resize(80, 24)));
    assert_eq!((ed.view().width, ed.view().height), (80, 22));
}

#[test]
fn viewport_follows_cursor() {
    let content: Vec<String> = (0..50).map(|n| format!("{n}")).collect();
    let mut ed = editor(&content.join("\n"));
    ed.resize(20, 12);
    keys(&mut ed, "15j");
    assert_eq!(ed.view().viewport_first_line, 6);
    keys(&mut ed, "gg");
    assert_eq!(ed.view().viewport_first_line, 0);
    keys(&mut ed, "G");
    assert_eq!(ed.view().viewport_first_line, 40);
}

#[test]
fn visible_lines_pad_and_number() {
    let mut ed = editor("alpha\nbeta");
    ed.resize(20, 5);
    let lines = ed.visible_lines(&PlainHighlighter);
    assert_eq!(
        lines,
        vec![
            DisplayLine { row: Some(0), number: Some(1), text: "alpha".into(), flash: None },
            DisplayLine { row: Some(1), number: Some(2), text: "beta".into(), flash: None },
            DisplayLine { row: None, number: None, text: String::new(), flash: None },
        ]
    );
}

#[test]
fn relative_numbers_and_custom_highlighter() {
    let mut ed = Editor::new(
        EditorOptions::new()
            .with_content("a\nb\nc\nd")
            .with_relative_numbers(true)
            .with_status_bar(false),
    );
    ed.resize(10, 4);
    keys(&mut ed, "jj");
    let upper = |_row: usize, line: &str| line.to_uppercase();
    let lines = ed.visible_lines(&upper);
    let numbers: Vec<Option<usize>> = lines.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![Some(2), Some(1), Some(3), Some(1)]);
    assert_eq!(lines[3].text, "D");
}

#[test]
fn yank_highlight_expires_on_tick() {
    let mut ed = Editor::new(
        EditorOptions::new()
            .with_content("abc")
            .with_yank_highlight(Duration::from_millis(5)),
    );
    ed.resize(20, 4);
    keys(&mut ed, "yy");
    assert!(ed.yank_highlight().is_some());
    assert_eq!(ed.visible_lines(&PlainHighlighter)[0].flash, Some((0, 3)));
    assert!(ed.tick(Instant::now() + Duration::from_secs(1)));
    assert!(ed.yank_highlight().is_none());
    assert_eq!(ed.visible_lines(&PlainHighlighter)[0].flash, None);
}

#[test]
fn yank_highlight_can_be_disabled() {
    let mut ed = Editor::new(
        EditorOptions::new()
            .with_content("abc")
            .with_yank_highlight(Duration::ZERO),
    );
    keys(&mut ed, "yy");
    assert!(ed.yank_highlight().is_none());
    assert!(ed.register().is_some());
}

#[test]
fn key_press_makes_cursor_visible_again() {
    let mut ed = Editor::new(EditorOptions::new().with_blink_interval(Duration::from_millis(1)));
    ed.tick(Instant::now() + Duration::from_secs(1));
    assert!(!ed.cursor_visible());
    keys(&mut ed, "l");
    assert!(ed.cursor_visible());
}

#[test]
fn set_mode_from_host() {
    let mut ed = editor("abc");
    ed.set_mode(Mode::Insert);
    assert_eq!(ed.mode(), Mode::Insert);
    keys(&mut ed, "x");
    assert_eq!(text(&ed), "xabc");
    ed.set_mode(Mode::Normal);
    assert_eq!(ed.mode(), Mode::Normal);
}
