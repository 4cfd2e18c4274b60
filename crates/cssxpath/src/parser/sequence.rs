//! Simple-selector sequences and their qualifiers.

use super::ast::{
    AttributeOperator, AttributeTest, Connective, ElementTest, PseudoClass, Qualifier, Sequence,
};
use super::{Parsed, Parser};
use crate::error::CompileError;
use crate::lexer::{Cursor, TokenKind};

/// Deepest `:not()` nesting accepted. Parsing and generation both recurse
/// once per level.
pub const MAX_NEGATION_DEPTH: usize = 32;

/// Where a sequence sits: how many `:not()` levels enclose it, and the
/// element name of the nearest enclosing sequence that has one.
#[derive(Debug, Clone, Copy, Default)]
struct Scope<'a> {
    depth: usize,
    element: Option<&'a str>,
}

impl Parser<'_> {
    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// Parse an optional type or universal selector followed by qualifiers.
    ///
    /// # Errors
    ///
    /// - [`CompileError::UnexpectedToken`] if neither an element test nor a
    ///   qualifier is present.
    /// - [`CompileError::UnsupportedPseudoClass`] for a same-type pseudo-class
    ///   in a sequence without an element name, plus any qualifier error.
    /// - [`CompileError::NestingTooDeep`] past [`MAX_NEGATION_DEPTH`] levels
    ///   of `:not()`.
    pub fn parse_sequence<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, Sequence> {
        self.parse_scoped_sequence(cursor, Scope::default())
    }

    fn parse_scoped_sequence<'a>(&self, cursor: Cursor<'a>, scope: Scope<'_>) -> Parsed<'a, Sequence> {
        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);
        let start = cursor;

        let (element, mut cursor) = if let Some((_, rest)) = self.lexer.token(TokenKind::Universal, cursor) {
            (Some(ElementTest::Universal), rest)
        } else if let Some((name, rest)) = self.lexer.token(TokenKind::Element, cursor) {
            (Some(ElementTest::Named(name.to_string())), rest)
        } else {
            (None, cursor)
        };

        // Same-type tests inside `:not()` may rely on the enclosing name.
        let element_name = match &element {
            Some(ElementTest::Named(name)) => Some(name.as_str()),
            Some(ElementTest::Universal) | None => scope.element,
        };
        let inner = Scope {
            depth: scope.depth,
            element: element_name,
        };

        let mut qualifiers = Vec::new();
        let mut first_same_type = None;
        while let Some((qualifier, rest)) = self.parse_scoped_qualifier(cursor, inner)? {
            if let Qualifier::PseudoClass(pseudo) = &qualifier
                && qualifier.connective() == Connective::SameType
                && first_same_type.is_none()
            {
                first_same_type = Some((cursor.offset(), pseudo.name()));
            }
            qualifiers.push(qualifier);
            cursor = rest;
        }

        if element.is_none() && qualifiers.is_empty() {
            return Err(CompileError::UnexpectedToken {
                position: start.offset(),
                expected: "type selector, `*`, or qualifier",
            });
        }

        // [§ 14.4.1 :nth-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
        // Same-type position is only expressible against a named element.
        if let Some((position, name)) = first_same_type
            && element_name.is_none()
        {
            return Err(CompileError::UnsupportedPseudoClass {
                position,
                name: name.to_string(),
            });
        }

        Ok((
            Sequence {
                element,
                qualifiers,
            },
            cursor,
        ))
    }

    /// Parse one qualifier, or return `Ok(None)` when no qualifier starts at
    /// `cursor`.
    ///
    /// # Errors
    ///
    /// Errors from a qualifier that started but is malformed or unsupported.
    pub fn parse_qualifier<'a>(
        &self,
        cursor: Cursor<'a>,
    ) -> Result<Option<(Qualifier, Cursor<'a>)>, CompileError> {
        self.parse_scoped_qualifier(cursor, Scope::default())
    }

    fn parse_scoped_qualifier<'a>(
        &self,
        cursor: Cursor<'a>,
        scope: Scope<'_>,
    ) -> Result<Option<(Qualifier, Cursor<'a>)>, CompileError> {
        // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
        if let Some((text, rest)) = self.lexer.token(TokenKind::Class, cursor) {
            return Ok(Some((Qualifier::Class(text[1..].to_string()), rest)));
        }

        // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
        if let Some((text, rest)) = self.lexer.token(TokenKind::Id, cursor) {
            return Ok(Some((Qualifier::Id(text[1..].to_string()), rest)));
        }

        if self.lexer.peek(TokenKind::PseudoClass, cursor) {
            let (pseudo, rest) = self.parse_pseudo_class(cursor, scope)?;
            return Ok(Some((Qualifier::PseudoClass(pseudo), rest)));
        }

        if self.lexer.peek(TokenKind::LBracket, cursor) {
            let (attribute, rest) = self.parse_attribute(cursor)?;
            return Ok(Some((Qualifier::Attribute(attribute), rest)));
        }

        Ok(None)
    }

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    fn parse_pseudo_class<'a>(&self, cursor: Cursor<'a>, scope: Scope<'_>) -> Parsed<'a, PseudoClass> {
        let Some((text, rest)) = self.lexer.token(TokenKind::PseudoClass, cursor) else {
            return Err(CompileError::UnexpectedToken {
                position: cursor.offset(),
                expected: "pseudo-class",
            });
        };
        let name = &text[1..];

        let pseudo = match name.to_ascii_lowercase().as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "nth-child" => {
                let (formula, rest) = self.parse_nth(rest)?;
                return Ok((PseudoClass::NthChild(formula), rest));
            }
            "nth-of-type" => {
                let (formula, rest) = self.parse_nth(rest)?;
                return Ok((PseudoClass::NthOfType(formula), rest));
            }
            "not" => {
                if scope.depth >= MAX_NEGATION_DEPTH {
                    return Err(CompileError::NestingTooDeep {
                        position: cursor.offset(),
                        limit: MAX_NEGATION_DEPTH,
                    });
                }
                let inner = Scope {
                    depth: scope.depth + 1,
                    ..scope
                };
                let (sequence, rest) = self.parse_negation(rest, inner)?;
                return Ok((PseudoClass::Not(Box::new(sequence)), rest));
            }
            _ => {
                return Err(CompileError::UnsupportedPseudoClass {
                    position: cursor.offset(),
                    name: name.to_string(),
                });
            }
        };

        Ok((pseudo, rest))
    }

    /// [§ 4.3 The Negation Pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
    ///
    /// The argument is a single sequence; combinators inside `:not()` are
    /// rejected by the closing-parenthesis check.
    fn parse_negation<'a>(&self, cursor: Cursor<'a>, scope: Scope<'_>) -> Parsed<'a, Sequence> {
        let cursor = self.expect(TokenKind::LParen, cursor, "`(` after `:not`")?;
        let (sequence, cursor) = self.parse_scoped_sequence(cursor, scope)?;
        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);
        let cursor = self.expect(TokenKind::RParen, cursor, "`)` closing `:not(`")?;
        Ok((sequence, cursor))
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn parse_attribute<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, AttributeTest> {
        let cursor = self.expect(TokenKind::LBracket, cursor, "`[`")?;
        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);

        let Some((name, cursor)) = self.lexer.token(TokenKind::AttrName, cursor) else {
            return Err(CompileError::UnexpectedToken {
                position: cursor.offset(),
                expected: "attribute name",
            });
        };
        let name = name.to_string();
        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);

        if let Some((_, rest)) = self.lexer.token(TokenKind::RBracket, cursor) {
            return Ok((AttributeTest::Exists { name }, rest));
        }

        let Some((operator_text, after_operator)) =
            self.lexer.token(TokenKind::AttrOperator, cursor)
        else {
            return Err(CompileError::UnexpectedToken {
                position: cursor.offset(),
                expected: "`]` or attribute operator",
            });
        };
        let Some(operator) = AttributeOperator::from_text(operator_text) else {
            return Err(CompileError::UnsupportedAttributeOperator {
                position: cursor.offset(),
                operator: operator_text.to_string(),
            });
        };

        let cursor = self.lexer.skip(TokenKind::Spaces, after_operator);
        let (value, cursor) = if let Some((quoted, rest)) = self.lexer.token(TokenKind::AttrValue, cursor) {
            (unquote(quoted), rest)
        } else if let Some((ident, rest)) = self.lexer.token(TokenKind::Ident, cursor) {
            (ident.to_string(), rest)
        } else {
            return Err(CompileError::UnexpectedToken {
                position: cursor.offset(),
                expected: "attribute value",
            });
        };

        let cursor = self.lexer.skip(TokenKind::Spaces, cursor);
        let cursor = self.expect(TokenKind::RBracket, cursor, "`]`")?;

        Ok((
            AttributeTest::Match {
                name,
                operator,
                value,
            },
            cursor,
        ))
    }

    /// Consume a mandatory token.
    pub(super) fn expect<'a>(
        &self,
        kind: TokenKind,
        cursor: Cursor<'a>,
        expected: &'static str,
    ) -> Result<Cursor<'a>, CompileError> {
        self.lexer
            .token(kind, cursor)
            .map(|(_, rest)| rest)
            .ok_or(CompileError::UnexpectedToken {
                position: cursor.offset(),
                expected,
            })
    }
}

/// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
///
/// Strip the quotes from a lexed string and resolve escapes: a backslash
/// followed by 1-6 hex digits (and one optional whitespace) is a code point,
/// any other escaped character stands for itself. Zero, surrogates, and
/// values above U+10FFFF become U+FFFD.
fn unquote(quoted: &str) -> String {
    let body = &quoted[1..quoted.len() - 1];
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 && chars.peek().is_some_and(char::is_ascii_hexdigit) {
            if let Some(digit) = chars.next() {
                hex.push(digit);
            }
        }

        if hex.is_empty() {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
            }
            continue;
        }

        // "If the next input code point is whitespace, consume it as well."
        if chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            let _ = chars.next();
        }
        let code_point = u32::from_str_radix(&hex, 16).unwrap_or(0);
        let ch = match code_point {
            0 => None,
            _ => char::from_u32(code_point),
        };
        value.push(ch.unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    value
}
