//! Path description tokenizer
//!
//! Splits a path description into command letters and operand substrings.
//! A command letter always forms its own token. Spaces, commas, tabs and line
//! breaks end the current operand. A `-` ends the current operand and starts a
//! new one, so `5-3` splits into `5` and `-3` while `-3` keeps its sign; the
//! exception is a `-` directly after an exponent marker (`1e-3`).

use plotarm_core::PathError;
use std::fmt;

/// Command letters recognized in a path description
pub const COMMANDS: [char; 20] = [
    'M', 'm', 'L', 'l', 'Z', 'z', 'H', 'h', 'V', 'v', 'C', 'c', 'S', 's', 'Q', 'q', 'T', 't',
    'A', 'a',
];

/// Check whether `c` is a path command letter
pub fn is_command(c: char) -> bool {
    COMMANDS.contains(&c)
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | ',' | '\t' | '\r' | '\n')
}

/// A single token of a path description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A command letter
    Command(char),
    /// A numeric literal, not yet parsed
    Operand(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(c) => write!(f, "{}", c),
            Token::Operand(s) => write!(f, "{}", s),
        }
    }
}

/// Lazy token stream over a path description
///
/// Holds no state beyond its cursor; call [`tokenize`] again to start over.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    start: usize,
    queued: Option<char>,
}

/// Tokenize a path description
///
/// Fails with [`PathError::Empty`] when the input is empty or whitespace only.
pub fn tokenize(input: &str) -> Result<Tokenizer<'_>, PathError> {
    if input.trim().is_empty() {
        return Err(PathError::Empty);
    }
    Ok(Tokenizer {
        input,
        pos: 0,
        start: 0,
        queued: None,
    })
}

impl<'a> Tokenizer<'a> {
    /// The full input being tokenized
    pub fn input(&self) -> &'a str {
        self.input
    }

    fn pending(&self, end: usize) -> Option<Token<'a>> {
        (self.start < end).then(|| Token::Operand(&self.input[self.start..end]))
    }

    fn follows_exponent(&self, at: usize) -> bool {
        at > self.start && matches!(self.input[..at].chars().next_back(), Some('e' | 'E'))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(command) = self.queued.take() {
            return Some(Token::Command(command));
        }

        while let Some(c) = self.input[self.pos..].chars().next() {
            let at = self.pos;
            self.pos += c.len_utf8();

            if is_command(c) {
                let pending = self.pending(at);
                self.start = self.pos;
                return match pending {
                    Some(operand) => {
                        self.queued = Some(c);
                        Some(operand)
                    }
                    None => Some(Token::Command(c)),
                };
            }

            if is_separator(c) {
                let pending = self.pending(at);
                self.start = self.pos;
                if pending.is_some() {
                    return pending;
                }
                continue;
            }

            if c == '-' && !self.follows_exponent(at) {
                let pending = self.pending(at);
                self.start = at;
                if pending.is_some() {
                    return pending;
                }
            }
        }

        let pending = self.pending(self.input.len());
        self.start = self.input.len();
        pending
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
