//! Command line parsing.
//!
//! Converts the raw command-line text (with or without the leading `:`) into
//! a `ParsedCommand`. Parsing is pure; lookup and execution happen in the
//! command registry.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Blank line; submitting it does nothing.
    Empty,
    /// First whitespace-separated word plus the remaining words.
    Named { name: String, args: Vec<String> },
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let body = raw.trim();
        let body = body.strip_prefix(':').unwrap_or(body);
        let mut words = body.split_whitespace();
        let Some(name) = words.next() else {
            return ParsedCommand::Empty;
        };
        ParsedCommand::Named {
            name: name.to_string(),
            args: words.map(str::to_string).collect(),
        }
    }
}
