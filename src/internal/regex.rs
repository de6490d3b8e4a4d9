//! The regex abstract syntax the matcher compiles patterns into.
//!
//! Regexes here are built programmatically from pattern rasters, never parsed
//! from text, and run over dense letter ids instead of characters.

use super::{AcceptID, IntSet};

/// A regular expression over a dense letter alphabet, with labelled accepts.
///
/// A closed sum type: the compilation pipeline matches exhaustively on it.
#[derive(Debug, Clone)]
pub(crate) enum Regex {
    /// Matches exactly one letter from the given set.
    Letters(IntSet),
    /// Matches any single letter of the alphabet.
    Wildcard,
    /// Matches the children in sequence.
    Concat(Vec<Regex>),
    /// Matches any one of the children.
    Union(Vec<Regex>),
    /// Matches zero or more repetitions of the child.
    Star(Box<Regex>),
    /// Consumes no input and tags the current position with an accept label.
    /// Labels distinguish simultaneously-accepting alternatives.
    Accept(AcceptID),
}

impl Regex {
    /// A single-letter atom.
    pub(crate) fn letter(alphabet_len: usize, letter: usize) -> Self {
        Regex::Letters(IntSet::singleton(alphabet_len, letter))
    }

    /// `Star(Wildcard)`: an arbitrary prefix of the input.
    pub(crate) fn any_prefix() -> Self {
        Regex::Star(Box::new(Regex::Wildcard))
    }
}
