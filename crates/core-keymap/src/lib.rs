//! core-keymap: key-sequence and ex-command registries.
//!
//! Design principles:
//! - Registries are plain owned values; the controller that owns them decides
//!   what a handler is (the handler type is a generic parameter).
//! - Each mode compiles its bindings into a trie so exact-match and prefix
//!   queries are a single walk.
//! - Registration is last-write-wins; an overwritten sequence keeps its slot
//!   in `get_for_mode` ordering.
//! - No side effects: logging only at TRACE for traversal steps.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

// -------------------------------------------------------------------------------------------------
// Key Token Pattern
// -------------------------------------------------------------------------------------------------
/// Named keys that are one token despite being spelled with several chars.
pub const NAMED_KEYS: &[&str] = &[
    "enter",
    "esc",
    "backspace",
    "tab",
    "up",
    "down",
    "left",
    "right",
    "home",
    "end",
    "delete",
    "insert",
    "pgup",
    "pgdown",
];

const MODIFIER_PREFIXES: &[&str] = &["ctrl+", "alt+", "shift+"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyTokenPattern {
    Char(char),
    /// Named key or modifier chord such as `enter` or `ctrl+r`.
    Named(String),
}

impl KeyTokenPattern {
    /// Classify one key token as produced by the input layer.
    pub fn from_token(token: &str) -> Self {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyTokenPattern::Char(c),
            _ => KeyTokenPattern::Named(token.to_owned()),
        }
    }

    fn matches(&self, other: &KeyTokenPattern) -> bool {
        self == other
    }
}

/// Split a binding sequence string into key tokens. A whole-string named
/// key or chord (`enter`, `ctrl+r`) is one token; anything else is one
/// token per char (`dd`, `gg`, `diw`).
pub fn parse_sequence(sequence: &str) -> Vec<KeyTokenPattern> {
    let is_named = NAMED_KEYS.contains(&sequence)
        || MODIFIER_PREFIXES
            .iter()
            .any(|p| sequence.len() > p.len() && sequence.starts_with(p));
    if is_named {
        vec![KeyTokenPattern::Named(sequence.to_owned())]
    } else {
        sequence.chars().map(KeyTokenPattern::Char).collect()
    }
}

/// Convert buffered key tokens to trie patterns.
pub fn tokens_to_patterns<S: AsRef<str>>(tokens: &[S]) -> Vec<KeyTokenPattern> {
    tokens
        .iter()
        .map(|t| KeyTokenPattern::from_token(t.as_ref()))
        .collect()
}

// -------------------------------------------------------------------------------------------------
// Binding
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Binding<M, H> {
    pub key: String,
    pub mode: M,
    pub description: String,
    pub handler: H,
}

// -------------------------------------------------------------------------------------------------
// Trie Representation
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
struct Edge {
    pat: KeyTokenPattern,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node {
    terminal: Option<usize>, // index into bindings vec
    edges: SmallVec<[Edge; 4]>,
}

impl Node {
    fn new() -> Self {
        Self {
            terminal: None,
            edges: SmallVec::new(),
        }
    }
}

#[derive(Debug)]
struct MappingTrie {
    nodes: Vec<Node>,
}

impl MappingTrie {
    fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    /// Find or create the node for `sequence`.
    fn insert_path(&mut self, sequence: &[KeyTokenPattern]) -> usize {
        let mut cur = 0usize;
        for pat in sequence {
            cur = if let Some(e) = self.nodes[cur].edges.iter().find(|e| e.pat == *pat) {
                e.next
            } else {
                let new_idx = self.nodes.len();
                self.nodes.push(Node::new());
                self.nodes[cur].edges.push(Edge {
                    pat: pat.clone(),
                    next: new_idx,
                });
                new_idx
            };
        }
        cur
    }

    fn walk(&self, sequence: &[KeyTokenPattern]) -> Option<usize> {
        let mut node_idx = 0usize;
        for (i, pat) in sequence.iter().enumerate() {
            let edge = self.nodes[node_idx].edges.iter().find(|e| e.pat.matches(pat))?;
            node_idx = edge.next;
            trace!(target: "input.map", step = i, pat = ?pat, node = node_idx, "advance");
        }
        Some(node_idx)
    }
}

// -------------------------------------------------------------------------------------------------
// Resolution Result
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub enum Resolution<'a, M, H> {
    /// The sequence is bound.
    Matched(&'a Binding<M, H>),
    /// Strict prefix of one or more longer bindings; keep buffering.
    NeedMore,
    NoMatch,
}

// -------------------------------------------------------------------------------------------------
// Binding Registry
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
struct ModeTable<M, H> {
    trie: MappingTrie,
    bindings: Vec<Binding<M, H>>,
}

impl<M, H> ModeTable<M, H> {
    fn new() -> Self {
        Self {
            trie: MappingTrie::new(),
            bindings: Vec::new(),
        }
    }
}

/// Maps `(mode, key sequence)` to a handler.
#[derive(Debug)]
pub struct BindingRegistry<M, H> {
    modes: HashMap<M, ModeTable<M, H>>,
}

impl<M, H> Default for BindingRegistry<M, H> {
    fn default() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }
}

impl<M: Copy + Eq + Hash + std::fmt::Debug, H> BindingRegistry<M, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` in `mode`. A second registration of the same pair
    /// replaces the first.
    pub fn add(&mut self, key: impl Into<String>, mode: M, description: impl Into<String>, handler: H) {
        let key = key.into();
        let table = self.modes.entry(mode).or_insert_with(ModeTable::new);
        let node = table.trie.insert_path(&parse_sequence(&key));
        let binding = Binding {
            key,
            mode,
            description: description.into(),
            handler,
        };
        if let Some(idx) = table.trie.nodes[node].terminal {
            trace!(target: "input.map", key = %binding.key, mode = ?mode, node, "terminal_override");
            table.bindings[idx] = binding;
        } else {
            table.trie.nodes[node].terminal = Some(table.bindings.len());
            table.bindings.push(binding);
        }
    }

    pub fn find_exact(&self, sequence: &str, mode: M) -> Option<&Binding<M, H>> {
        self.find_exact_tokens(&parse_sequence(sequence), mode)
    }

    pub fn find_exact_tokens(&self, sequence: &[KeyTokenPattern], mode: M) -> Option<&Binding<M, H>> {
        let table = self.modes.get(&mode)?;
        let node = table.trie.walk(sequence)?;
        table.trie.nodes[node].terminal.map(|i| &table.bindings[i])
    }

    /// True iff some binding in `mode` is strictly longer than `sequence`
    /// and starts with it.
    pub fn is_prefix(&self, sequence: &str, mode: M) -> bool {
        self.is_prefix_tokens(&parse_sequence(sequence), mode)
    }

    pub fn is_prefix_tokens(&self, sequence: &[KeyTokenPattern], mode: M) -> bool {
        self.modes
            .get(&mode)
            .and_then(|t| t.trie.walk(sequence).map(|n| !t.trie.nodes[n].edges.is_empty()))
            .unwrap_or(false)
    }

    /// Exact match first, then prefix, else no match.
    pub fn resolve(&self, sequence: &[KeyTokenPattern], mode: M) -> Resolution<'_, M, H> {
        if let Some(b) = self.find_exact_tokens(sequence, mode) {
            Resolution::Matched(b)
        } else if self.is_prefix_tokens(sequence, mode) {
            Resolution::NeedMore
        } else {
            Resolution::NoMatch
        }
    }

    /// All bindings for `mode` in registration order.
    pub fn get_for_mode(&self, mode: M) -> Vec<&Binding<M, H>> {
        self.modes
            .get(&mode)
            .map(|t| t.bindings.iter().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.modes.values().map(|t| t.bindings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -------------------------------------------------------------------------------------------------
// Command Registry
// -------------------------------------------------------------------------------------------------
/// Maps ex-command names to handlers. Last registration wins.
#[derive(Debug)]
pub struct CommandRegistry<H> {
    commands: HashMap<String, H>,
}

impl<H> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }
}

impl<H> CommandRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: H) {
        let name = name.into();
        if self.commands.insert(name.clone(), handler).is_some() {
            trace!(target: "input.map", command = %name, "command_override");
        }
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.commands.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
