//! Token kinds recognised by the selector lexer.
//!
//! The set is closed: every kind has exactly one pattern, listed in
//! [`TokenKind::pattern`]. Several kinds overlap on purpose (e.g. `Spaces` and
//! `AncestorOf`) so that each parsing step can ask for exactly the construct
//! it expects.

use strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr};

/// [Selectors Level 3 § 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex)
///
/// One lexical category of the selector grammar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// Run of whitespace.
    Spaces,
    /// Selector-list separator, with any whitespace before it.
    Comma,
    /// `*`
    Universal,
    /// Type selector.
    Element,
    /// `.name`
    Class,
    /// `#name`
    Id,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// Attribute name inside `[...]`. Restricted to names that are valid
    /// XPath name tests without a namespace prefix.
    AttrName,
    /// Quoted attribute value, `"..."` or `'...'`.
    AttrValue,
    /// Unquoted identifier (bare attribute value).
    Ident,
    /// `=`, `~=`, `|=`, `^=`, `$=`, `*=`
    AttrOperator,
    /// `:name`
    PseudoClass,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Unsigned integer.
    Number,
    /// `odd`, any case.
    Odd,
    /// `even`, any case.
    Even,
    /// The `n` of an `an+b` formula, any case.
    N,
    /// `+` or `-`.
    Sign,
    /// `+` combinator, with any whitespace before it.
    AdjacentTo,
    /// `~` combinator, with any whitespace before it.
    Precedes,
    /// `>` combinator, with any whitespace before it.
    ParentOf,
    /// Whitespace acting as the descendant combinator.
    AncestorOf,
}

impl TokenKind {
    /// The regular expression matched for this kind.
    ///
    /// Patterns are written unanchored; the lexer anchors every search at the
    /// cursor.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Spaces | Self::AncestorOf => r"\s+",
            Self::Comma => r"\s*,",
            Self::Universal => r"\*",
            Self::Element => r"[_a-zA-Z][-\w]*",
            Self::Class => r"\.[-_\w]+",
            Self::Id => r"#[-_\w]+",
            Self::LBracket => r"\[",
            Self::RBracket => r"\]",
            Self::AttrName => r"[_a-zA-Z][-\w.]*",
            Self::AttrValue => r#"(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*')"#,
            Self::Ident => r"[-_a-zA-Z][-\w]*",
            Self::AttrOperator => r"[~|^$*!]?=",
            Self::PseudoClass => r":[-_a-zA-Z]+",
            Self::LParen => r"\(",
            Self::RParen => r"\)",
            Self::Number => r"\d+",
            Self::Odd => r"(?i:odd)",
            Self::Even => r"(?i:even)",
            Self::N => r"[nN]",
            Self::Sign => r"[-+]",
            Self::AdjacentTo => r"\s*\+",
            Self::Precedes => r"\s*~",
            Self::ParentOf => r"\s*>",
        }
    }
}
