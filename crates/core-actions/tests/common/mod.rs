#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_actions::{DispatchResult, Editor, EditorOptions, KeyCode, KeyEvent, Position};

pub fn editor(content: &str) -> Editor {
    Editor::new(EditorOptions::new().with_content(content))
}

pub fn editor_at(content: &str, row: usize, col: usize) -> Editor {
    let mut ed = editor(content);
    ed.set_cursor(Position::new(row, col));
    ed
}

/// Parse a key script: plain chars are typed as-is; `<esc>`, `<cr>`,
/// `<bs>`, `<tab>`, `<left>`, `<right>`, `<up>`, `<down>` and `<C-x>` name
/// special keys.
pub fn parse_keys(script: &str) -> Vec<KeyEvent> {
    let mut out = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(KeyEvent::char(c));
            continue;
        }
        let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
        let key = match name.as_str() {
            "esc" => KeyEvent::plain(KeyCode::Esc),
            "cr" => KeyEvent::plain(KeyCode::Enter),
            "bs" => KeyEvent::plain(KeyCode::Backspace),
            "tab" => KeyEvent::plain(KeyCode::Tab),
            "left" => KeyEvent::plain(KeyCode::Left),
            "right" => KeyEvent::plain(KeyCode::Right),
            "up" => KeyEvent::plain(KeyCode::Up),
            "down" => KeyEvent::plain(KeyCode::Down),
            "lt" => KeyEvent::char('<'),
            other => match other.strip_prefix("C-").and_then(|s| s.chars().next()) {
                Some(c) => KeyEvent::ctrl(c),
                None => panic!("unknown key name <{other}>"),
            },
        };
        out.push(key);
    }
    out
}

/// Feed a key script, running each key's deferred work like a host loop.
/// Returns the merged result.
pub fn keys(ed: &mut Editor, script: &str) -> DispatchResult {
    let mut merged = DispatchResult::clean();
    for key in parse_keys(script) {
        let res = ed.press(key);
        merged.dirty |= res.dirty;
        merged.quit |= res.quit;
        if res.history.is_some() {
            merged.history = res.history;
        }
    }
    merged
}

pub fn text(ed: &Editor) -> String {
    ed.document().text()
}
