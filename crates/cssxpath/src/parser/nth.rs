//! The `An+B` microsyntax used by `:nth-child()` and `:nth-of-type()`.

use super::ast::NthFormula;
use super::{Parsed, Parser};
use crate::error::CompileError;
use crate::lexer::{Cursor, TokenKind};

impl Parser<'_> {
    /// [§ 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
    ///
    /// Parse a parenthesised formula: `(odd)`, `(even)`, `(an+b)`, `(an)`, or
    /// `(b)`. Whitespace is allowed inside the parentheses and around the
    /// sign before `b`.
    ///
    /// # Errors
    ///
    /// [`CompileError::UnexpectedToken`] when the parentheses, the `n`/number,
    /// or the constant after a sign is missing, or an integer does not fit in
    /// 64 bits.
    pub fn parse_nth<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, NthFormula> {
        let cursor = self.expect(TokenKind::LParen, cursor, "`(` before nth formula")?;
        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);

        let (formula, cursor) = if let Some((_, rest)) = self.lexer.token(TokenKind::Even, cursor) {
            (NthFormula::Even, rest)
        } else if let Some((_, rest)) = self.lexer.token(TokenKind::Odd, cursor) {
            (NthFormula::Odd, rest)
        } else {
            self.parse_linear(cursor)?
        };

        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);
        let cursor = self.expect(TokenKind::RParen, cursor, "`)` after nth formula")?;
        Ok((formula, cursor))
    }

    /// `[sign][digits]n [sign digits]` or `[sign]digits`.
    fn parse_linear<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, NthFormula> {
        let (negative, after_sign) = match self.lexer.token(TokenKind::Sign, cursor) {
            Some((sign, rest)) => (sign == "-", rest),
            None => (false, cursor),
        };
        let (digits, after_digits) = match self.lexer.token(TokenKind::Number, after_sign) {
            Some((digits, rest)) => (Some(digits), rest),
            None => (None, after_sign),
        };

        let Some((_, after_n)) = self.lexer.token(TokenKind::N, after_digits) else {
            // No `n` term: a bare position.
            let Some(digits) = digits else {
                return Err(CompileError::UnexpectedToken {
                    position: after_sign.offset(),
                    expected: "`odd`, `even`, or an+b formula",
                });
            };
            let constant = signed(parse_integer(digits, after_sign)?, negative);
            return Ok((
                NthFormula::Linear {
                    coefficient: 0,
                    constant,
                },
                after_digits,
            ));
        };

        // A sign with no digits means a coefficient of one.
        let magnitude = match digits {
            Some(digits) => parse_integer(digits, after_sign)?,
            None => 1,
        };
        let coefficient = signed(magnitude, negative);

        let probe = self.lexer.skip(TokenKind::Spaces, after_n);
        let Some((operator, after_operator)) = self.lexer.token(TokenKind::Sign, probe) else {
            return Ok((
                NthFormula::Linear {
                    coefficient,
                    constant: 0,
                },
                after_n,
            ));
        };

        let constant_at = self.lexer.skip(TokenKind::Spaces, after_operator);
        let Some((digits, rest)) = self.lexer.token(TokenKind::Number, constant_at) else {
            return Err(CompileError::UnexpectedToken {
                position: constant_at.offset(),
                expected: "integer after sign in nth formula",
            });
        };
        let constant = signed(parse_integer(digits, constant_at)?, operator == "-");

        Ok((
            NthFormula::Linear {
                coefficient,
                constant,
            },
            rest,
        ))
    }
}

fn parse_integer(digits: &str, at: Cursor<'_>) -> Result<i64, CompileError> {
    digits
        .parse::<i64>()
        .map_err(|_| CompileError::UnexpectedToken {
            position: at.offset(),
            expected: "integer that fits in 64 bits",
        })
}

const fn signed(magnitude: i64, negative: bool) -> i64 {
    if negative { -magnitude } else { magnitude }
}
