//! The pattern table: one compiled, anchored matcher per [`TokenKind`].

use std::sync::LazyLock;

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use strum::{EnumCount, IntoEnumIterator};

use super::token::TokenKind;
use crate::error::PatternError;

/// Compiled matchers indexed by token kind.
///
/// The table is an immutable value. The built-in rules are available through
/// [`PatternTable::shared`]; a substitute table (for tests, or for a dialect
/// with different identifier rules) is built with [`PatternTable::with_pattern`].
#[derive(Debug, Clone)]
pub struct PatternTable {
    matchers: Vec<Regex>,
}

static SHARED: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::new().expect("built-in token patterns are valid regular expressions")
});

impl PatternTable {
    /// Compile the built-in pattern for every token kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in pattern fails to compile, which would be
    /// a bug in [`TokenKind::pattern`].
    pub fn new() -> Result<Self, PatternError> {
        let mut matchers = Vec::with_capacity(TokenKind::COUNT);
        for kind in TokenKind::iter() {
            matchers.push(compile(kind, kind.pattern())?);
        }
        Ok(Self { matchers })
    }

    /// The process-wide table of built-in patterns, compiled on first use.
    ///
    /// # Panics
    ///
    /// Panics on first use if a built-in pattern is invalid.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Replace the rule for `kind`, leaving every other rule untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn with_pattern(mut self, kind: TokenKind, pattern: &str) -> Result<Self, PatternError> {
        self.matchers[kind as usize] = compile(kind, pattern)?;
        Ok(self)
    }

    /// Length in bytes of the match for `kind` anchored at the start of
    /// `haystack`, or `None` when nothing (or only the empty string) matches.
    #[must_use]
    pub fn match_len(&self, kind: TokenKind, haystack: &str) -> Option<usize> {
        let input = Input::new(haystack).anchored(Anchored::Yes);
        self.matchers[kind as usize]
            .search(&input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

fn compile(kind: TokenKind, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        kind: kind.into(),
        source,
    })
}
