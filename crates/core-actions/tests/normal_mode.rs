mod common;
use common::*;

use core_actions::{HistoryOp, HistoryOutcome, Mode, Position, Yank};

#[test]
fn dd_needs_two_keys() {
    let mut ed = editor_at("Line 1\nLine 2\nLine 3", 1, 0);
    keys(&mut ed, "d");
    assert_eq!(text(&ed), "Line 1\nLine 2\nLine 3");
    assert_eq!(ed.pending_keys().len(), 1);
    assert_eq!(ed.status_text(), " NORMAL | d");
    keys(&mut ed, "d");
    assert_eq!(text(&ed), "Line 1\nLine 3");
    assert!(ed.pending_keys().is_empty());
    assert_eq!(ed.register(), Some(&Yank::linewise("Line 2")));
}

#[test]
fn counted_movement_resets_count() {
    let mut ed = editor("Line 1\nLine 2\nLine 3\nLine 4\nLine 5");
    keys(&mut ed, "3");
    assert_eq!(ed.count_prefix(), 3);
    keys(&mut ed, "j");
    assert_eq!(ed.cursor().row, 3);
    assert_eq!(ed.count_prefix(), 1);
    keys(&mut ed, "9j");
    assert_eq!(ed.cursor().row, 4);
    keys(&mut ed, "2k");
    assert_eq!(ed.cursor().row, 2);
}

#[test]
fn multi_digit_count() {
    let content: Vec<String> = (1..=30).map(|n| format!("line {n}")).collect();
    let mut ed = editor(&content.join("\n"));
    keys(&mut ed, "12");
    assert_eq!(ed.count_prefix(), 12);
    keys(&mut ed, "j");
    assert_eq!(ed.cursor().row, 12);
    keys(&mut ed, "20G");
    assert_eq!(ed.cursor().row, 19);
    keys(&mut ed, "gg");
    assert_eq!(ed.cursor().row, 0);
    keys(&mut ed, "G");
    assert_eq!(ed.cursor().row, 29);
}

#[test]
fn counted_dd_is_one_undo_step() {
    let mut ed = editor("a\nb\nc\nd\ne");
    keys(&mut ed, "j3dd");
    assert_eq!(text(&ed), "a\ne");
    let res = keys(&mut ed, "u");
    assert_eq!(
        res.history,
        Some(HistoryOutcome { op: HistoryOp::Undo, success: true })
    );
    assert_eq!(text(&ed), "a\nb\nc\nd\ne");
    assert_eq!(ed.cursor(), Position::new(1, 0));
    keys(&mut ed, "<C-r>");
    assert_eq!(text(&ed), "a\ne");
}

#[test]
fn undo_with_empty_history_reports_failure() {
    let mut ed = editor("abc");
    let res = keys(&mut ed, "u");
    assert_eq!(
        res.history,
        Some(HistoryOutcome { op: HistoryOp::Undo, success: false })
    );
    assert_eq!(text(&ed), "abc");
}

#[test]
fn counted_undo_walks_back_several_steps() {
    let mut ed = editor("abcdef");
    keys(&mut ed, "xxx");
    assert_eq!(text(&ed), "def");
    keys(&mut ed, "2u");
    assert_eq!(text(&ed), "bcdef");
    keys(&mut ed, "2<C-r>");
    assert_eq!(text(&ed), "def");
}

#[test]
fn yank_line_then_paste_below_and_above() {
    let mut ed = editor("first\nsecond");
    keys(&mut ed, "yyjp");
    assert_eq!(text(&ed), "first\nsecond\nfirst");
    assert_eq!(ed.cursor(), Position::new(2, 0));
    keys(&mut ed, "ggP");
    assert_eq!(text(&ed), "first\nfirst\nsecond\nfirst");
}

#[test]
fn x_then_p_swaps_characters() {
    let mut ed = editor("ab");
    keys(&mut ed, "xp");
    assert_eq!(text(&ed), "ba");
}

#[test]
fn dw_and_dollar_delete() {
    let mut ed = editor("one two three");
    keys(&mut ed, "dw");
    assert_eq!(text(&ed), "two three");
    keys(&mut ed, "wD");
    assert_eq!(text(&ed), "two ");
    assert_eq!(ed.cursor(), Position::new(0, 3));
}

#[test]
fn text_objects_through_key_sequences() {
    let mut ed = editor("let value = compute(arg);");
    keys(&mut ed, "4l");
    keys(&mut ed, "yiw");
    assert_eq!(ed.register(), Some(&Yank::characterwise("value")));
    keys(&mut ed, "diw");
    assert_eq!(text(&ed), "let  = compute(arg);");
    keys(&mut ed, "u");
    keys(&mut ed, "ciwtotal<esc>");
    assert_eq!(text(&ed), "let total = compute(arg);");
    assert_eq!(ed.mode(), Mode::Normal);
    keys(&mut ed, "u");
    assert_eq!(text(&ed), "let value = compute(arg);");
}

#[test]
fn unmatched_keys_are_ignored() {
    let mut ed = editor("abc");
    keys(&mut ed, "zQ");
    keys(&mut ed, "dq");
    assert_eq!(text(&ed), "abc");
    assert!(ed.pending_keys().is_empty());
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn custom_binding_runs_with_count() {
    use std::cell::Cell;
    use std::rc::Rc;
    let mut ed = editor("abc");
    let seen = Rc::new(Cell::new(0));
    let sink = seen.clone();
    ed.add_binding("ctrl+t", Mode::Normal, "Test binding", move |_, count| {
        sink.set(count);
        core_actions::Deferred::None
    });
    keys(&mut ed, "<C-t>");
    assert_eq!(seen.get(), 1);
    keys(&mut ed, "4<C-t>");
    assert_eq!(seen.get(), 4);
}

#[test]
fn custom_multi_key_binding_shadows_nothing() {
    let mut ed = editor("abc");
    ed.add_binding("zz", Mode::Normal, "Status", |ed, _| ed.set_status_message("zz"));
    keys(&mut ed, "z");
    assert_eq!(ed.pending_sequence(), "z");
    keys(&mut ed, "z");
    assert_eq!(ed.status_message(), Some("zz"));
}
