//! Translation of crossterm terminal events into editor input events.
//!
//! The host owns the terminal and its event loop; it hands each raw event to
//! [`translate_event`] and forwards the result to the editor.

mod key_token;

use core_events::{Event, InputEvent};
use crossterm::event::Event as CEvent;

/// Map a terminal event. Mouse, focus and paste events are not consumed by
/// the editor and yield `None`.
pub fn translate_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => match key_token::map_key_event(key) {
            Some(k) => Some(InputEvent::Key(k)),
            None => {
                tracing::trace!(target: "input.key", code = ?key.code, kind = ?key.kind, "key_dropped");
                None
            }
        },
        CEvent::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

/// Wrap [`translate_event`] into a queue event.
pub fn to_event(event: &CEvent) -> Option<Event> {
    translate_event(event).map(Event::Input)
}
