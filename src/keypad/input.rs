//! Turning typed text into key presses.
//!
//! Front ends without buttons accept key sequences as text. A sequence is
//! split on whitespace; each word is either a key label, an operation token,
//! a number (pressed digit by digit), or a run like `3+4` that is broken up
//! further.

use lazy_static::lazy_static;
use regex::Regex;

use super::Mode;
use crate::calculator::{CalcError, Operation};

lazy_static! {
    /// Plain unsigned decimal literal.
    static ref NUMBER: Regex = Regex::new(r"^(\d+\.?\d*|\.\d+)$").unwrap();

    /// Pieces of a run without spaces: numbers, words (`log10`, `CL_ALL`)
    /// or single symbols. Digits only stick to the few words that end in them.
    static ref PIECE: Regex = Regex::new(
        r"(?i:log10|log2|exp10)|\d+\.?\d*|\.\d*|[A-Za-z_]+|\S"
    ).unwrap();
}

/// Split a typed sequence into single-key tokens.
pub fn split_keys(input: &str) -> Vec<String> {
    let mut keys = Vec::new();

    for word in input.split_whitespace() {
        if NUMBER.is_match(word) {
            keys.extend(word.chars().map(String::from));
        } else if is_whole_key(word) {
            keys.push(word.to_string());
        } else {
            for piece in PIECE.find_iter(word).map(|m| m.as_str()) {
                if NUMBER.is_match(piece) || piece == "." {
                    keys.extend(piece.chars().map(String::from));
                } else {
                    keys.push(piece.to_string());
                }
            }
        }
    }

    keys
}

/// Resolve one token to an operation: keypad labels first, then tokens
/// and aliases.
pub fn resolve_key(token: &str) -> Result<Operation, CalcError> {
    if let Some(key) = Mode::Scientific.find(token) {
        return Ok(key.operation);
    }
    token.parse()
}

fn is_whole_key(word: &str) -> bool {
    Mode::Scientific.find(word).is_some() || word.parse::<Operation>().is_ok()
}
