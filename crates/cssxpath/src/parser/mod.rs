//! Recursive-descent selector parser.
//!
//! Each production takes a [`Cursor`] and returns the parsed node together
//! with the cursor after it. Productions never look behind their cursor and
//! never mutate shared state, so an alternative is tried simply by calling
//! another production with the same cursor.

/// Selector AST types.
pub mod ast;
mod nth;
mod sequence;

use crate::error::CompileError;
use crate::lexer::{Cursor, Lexer, PatternTable, TokenKind};
use crate::options::ListPolicy;

pub use sequence::MAX_NEGATION_DEPTH;
pub use ast::{
    AttributeOperator, AttributeTest, Combinator, Connective, ElementTest, NthFormula,
    PseudoClass, Qualifier, Selector, SelectorList, Sequence, SkippedSelector, Step,
};

/// Result of one production: the node and the cursor after it.
pub type Parsed<'a, T> = Result<(T, Cursor<'a>), CompileError>;

/// Selector parser over an injected pattern table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    lexer: Lexer<'t>,
}

impl<'t> Parser<'t> {
    /// Create a parser that lexes with `table`.
    #[must_use]
    pub const fn new(table: &'t PatternTable) -> Self {
        Self {
            lexer: Lexer::new(table),
        }
    }

    /// The lexer used by this parser.
    #[must_use]
    pub const fn lexer(&self) -> Lexer<'t> {
        self.lexer
    }

    /// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
    ///
    /// Parse a comma-separated selector list.
    ///
    /// Input after the last selector is returned unconsumed; the caller
    /// decides whether that is an error.
    ///
    /// # Errors
    ///
    /// Under [`ListPolicy::Strict`], the first selector that fails to parse.
    /// Under [`ListPolicy::SkipInvalid`], failing members are recorded in
    /// [`SelectorList::skipped`]; the first error is returned only when no
    /// selector at all could be parsed.
    pub fn parse_list<'a>(&self, cursor: Cursor<'a>, policy: ListPolicy) -> Parsed<'a, SelectorList> {
        let mut selectors = Vec::new();
        let mut skipped = Vec::new();
        let mut cursor = cursor;

        loop {
            let start = cursor;
            match (self.parse_selector(cursor), policy) {
                (Ok((selector, rest)), ListPolicy::Strict) => {
                    selectors.push(selector);
                    cursor = rest;
                }
                (Ok((selector, rest)), ListPolicy::SkipInvalid) => {
                    if self.at_list_boundary(rest) {
                        selectors.push(selector);
                        cursor = rest;
                    } else {
                        let trailing = self.lexer.skip(TokenKind::Spaces, rest);
                        let error = CompileError::TrailingInput {
                            position: trailing.offset(),
                            rest: trailing.rest().to_string(),
                        };
                        cursor = skip_selector(start, error, &mut skipped);
                    }
                }
                (Err(error), ListPolicy::Strict) => return Err(error),
                (Err(error), ListPolicy::SkipInvalid) => {
                    cursor = skip_selector(start, error, &mut skipped);
                }
            }

            match self.lexer.token(TokenKind::Comma, cursor) {
                Some((_, rest)) => cursor = rest,
                None => break,
            }
        }

        if selectors.is_empty() && !skipped.is_empty() {
            return Err(skipped.swap_remove(0).error);
        }
        Ok((
            SelectorList {
                selectors,
                skipped,
            },
            cursor,
        ))
    }

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// Parse one selector: sequences joined by combinators. A leading `>`
    /// scopes the first step to children of the context instead of
    /// descendants.
    ///
    /// # Errors
    ///
    /// Any error from [`Parser::parse_sequence`].
    pub fn parse_selector<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, Selector> {
        let (combinator, cursor) = match self.lexer.token(TokenKind::ParentOf, cursor) {
            Some((_, rest)) => (Combinator::Child, rest),
            None => (Combinator::Descendant, cursor),
        };

        let (sequence, mut cursor) = self.parse_sequence(cursor)?;
        let mut steps = vec![Step {
            combinator,
            sequence,
        }];

        while let Some((combinator, rest)) = self.combinator(cursor) {
            let (sequence, rest) = self.parse_sequence(rest)?;
            steps.push(Step {
                combinator,
                sequence,
            });
            cursor = rest;
        }

        Ok((Selector { steps }, cursor))
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// Explicit combinators are tried first. Whitespace is only the
    /// descendant combinator when another sequence follows it, i.e. not at
    /// the end of input, before a comma, or before a closing parenthesis.
    fn combinator<'a>(&self, cursor: Cursor<'a>) -> Option<(Combinator, Cursor<'a>)> {
        const EXPLICIT: [(TokenKind, Combinator); 3] = [
            (TokenKind::AdjacentTo, Combinator::NextSibling),
            (TokenKind::Precedes, Combinator::SubsequentSibling),
            (TokenKind::ParentOf, Combinator::Child),
        ];

        for (kind, combinator) in EXPLICIT {
            if let Some((_, rest)) = self.lexer.token(kind, cursor) {
                return Some((combinator, rest));
            }
        }

        let (_, rest) = self.lexer.token(TokenKind::AncestorOf, cursor)?;
        let ends_here = rest.is_at_end()
            || self.lexer.peek(TokenKind::Comma, cursor)
            || self.lexer.peek(TokenKind::RParen, rest);
        (!ends_here).then_some((Combinator::Descendant, rest))
    }

    /// Whether `cursor` sits at a comma or at the end of input (ignoring
    /// whitespace).
    fn at_list_boundary(&self, cursor: Cursor<'_>) -> bool {
        self.lexer.peek(TokenKind::Comma, cursor)
            || self.lexer.skip(TokenKind::Spaces, cursor).is_at_end()
    }
}

/// Record the failed member starting at `start` and return the cursor at the
/// next top-level comma (or the end of input).
fn skip_selector<'a>(
    start: Cursor<'a>,
    error: CompileError,
    skipped: &mut Vec<SkippedSelector>,
) -> Cursor<'a> {
    let end = resync(start);
    let text = &start.rest()[..end.offset() - start.offset()];
    skipped.push(SkippedSelector {
        text: text.trim().to_string(),
        error,
    });
    end
}

/// Find the next comma that is not nested in brackets, parentheses, or a
/// quoted string.
fn resync(start: Cursor<'_>) -> Cursor<'_> {
    let rest = start.rest();
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;

    for (index, ch) in rest.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return start.advance(index),
            _ => {}
        }
    }

    start.advance(rest.len())
}
