//! Selector lexer.
//!
//! The lexer is not a separate pass producing a token stream. Parsing steps
//! ask for a specific [`TokenKind`] at a [`Cursor`] and receive either the
//! matched text with an advanced cursor, or nothing. Because cursors are
//! `Copy`, trying an alternative production is just re-matching from the
//! cursor the caller still holds.

/// Compiled pattern table.
pub mod table;
/// Token kinds and their patterns.
pub mod token;

pub use table::PatternTable;
pub use token::TokenKind;

/// A position inside the input being compiled.
///
/// The remaining input is always a suffix of the original input, and a
/// cursor only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// Byte offset from the start of the original input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Whether all input has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.offset == self.source.len()
    }

    /// The cursor after consuming `len` bytes. `len` must land on a
    /// character boundary of the remaining input.
    #[must_use]
    pub(crate) const fn advance(self, len: usize) -> Self {
        Self {
            source: self.source,
            offset: self.offset + len,
        }
    }
}

/// Matches token kinds at a cursor using an injected [`PatternTable`].
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'t> {
    table: &'t PatternTable,
}

impl<'t> Lexer<'t> {
    /// Create a lexer over `table`.
    #[must_use]
    pub const fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    /// Match `kind` anchored at `cursor`.
    ///
    /// Returns the consumed text and the cursor after it, or `None` if the
    /// kind does not match here. An empty match counts as no match.
    #[must_use]
    pub fn token<'a>(&self, kind: TokenKind, cursor: Cursor<'a>) -> Option<(&'a str, Cursor<'a>)> {
        let rest = cursor.rest();
        let len = self.table.match_len(kind, rest)?;
        Some((&rest[..len], cursor.advance(len)))
    }

    /// Whether `kind` matches at `cursor`.
    #[must_use]
    pub fn peek(&self, kind: TokenKind, cursor: Cursor<'_>) -> bool {
        self.token(kind, cursor).is_some()
    }

    /// Consume `kind` if present, otherwise return the cursor unchanged.
    #[must_use]
    pub fn skip<'a>(&self, kind: TokenKind, cursor: Cursor<'a>) -> Cursor<'a> {
        self.token(kind, cursor).map_or(cursor, |(_, rest)| rest)
    }
}
