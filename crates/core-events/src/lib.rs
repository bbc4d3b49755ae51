//! Core event types and async event sources.
//!
//! The editor consumes one `Event` at a time from a single serial queue; the
//! only timer-driven producer is the blink tick source below.

use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Top-level event enum consumed by the host event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    Command(CommandEvent),
    /// Periodic tick driving cursor blink and highlight expiry.
    Tick,
    Shutdown,
}

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// An ex command was submitted: name plus whitespace-split argument tokens.
    Submitted { name: String, args: Vec<String> },
}

impl CommandEvent {
    /// Split a raw command line (without the leading `:`) into a submission.
    /// Returns `None` for a blank line.
    pub fn from_line(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let name = parts.next()?.to_owned();
        Some(CommandEvent::Submitted {
            name,
            args: parts.map(str::to_owned).collect(),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Async Event Sources
// -------------------------------------------------------------------------------------------------

/// Trait implemented by any async event producer. Implementors usually hold configuration and
/// spawn one background task that pushes `Event`s into the shared channel.
pub trait AsyncEventSource: Send + 'static {
    /// Human-readable stable identifier (used for logging / diagnostics).
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task, returning a JoinHandle. Implementors should
    /// stop when `tx.send(..).await` returns Err (channel closed).
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }
    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }
    pub fn len(&self) -> usize {
        self.sources.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
    /// Spawn all registered sources, returning their JoinHandles. Each source receives its own
    /// clone of `tx`; the caller should drop its final `Sender` during shutdown so the sources
    /// observe the closed channel and exit.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        // Drain so a second call spawns nothing.
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            tracing::info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Emits `Event::Tick` at the blink interval so the editor can toggle cursor
/// visibility and expire the yank highlight.
pub struct TickEventSource {
    interval: Duration,
}

impl TickEventSource {
    /// `None` for a zero interval: blinking is disabled and no timer runs.
    pub fn new(interval: Duration) -> Option<Self> {
        (!interval.is_zero()).then_some(Self { interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let period = self.interval;
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            // First tick completes immediately; the cursor starts visible.
            timer.tick().await;
            loop {
                timer.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    tracing::trace!(target: "runtime.events", "tick source stopping");
                    break;
                }
            }
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Keys
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

/// Normalized logical keys consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    Insert,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyCode {
    fn name(self) -> Option<&'static str> {
        Some(match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "enter",
            KeyCode::Esc => "esc",
            KeyCode::Backspace => "backspace",
            KeyCode::Tab => "tab",
            KeyCode::Up => "up",
            KeyCode::Down => "down",
            KeyCode::Left => "left",
            KeyCode::Right => "right",
            KeyCode::Home => "home",
            KeyCode::End => "end",
            KeyCode::Delete => "delete",
            KeyCode::Insert => "insert",
            KeyCode::PageUp => "pgup",
            KeyCode::PageDown => "pgdown",
        })
    }
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }
    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// A char that should be inserted literally (no Ctrl/Alt held).
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Key token used by the binding registry: `a`, `A`, ` `, `enter`,
    /// `ctrl+r`, `alt+x`, `shift+tab`. Shift on a char is already folded into
    /// the char itself and is not spelled out.
    pub fn token(&self) -> String {
        let mut out = String::new();
        if self.mods.contains(KeyModifiers::CTRL) {
            out.push_str("ctrl+");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            out.push_str("alt+");
        }
        match self.code.name() {
            Some(name) => {
                if self.mods.contains(KeyModifiers::SHIFT) {
                    out.push_str("shift+");
                }
                out.push_str(name);
            }
            None => {
                if let KeyCode::Char(c) = self.code {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}
