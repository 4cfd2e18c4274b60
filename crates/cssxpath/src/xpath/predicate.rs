//! Predicate expressions for individual qualifiers.

use std::fmt::Write as _;

use crate::parser::ast::{
    AttributeOperator, AttributeTest, NthFormula, PseudoClass, Qualifier, Sequence,
};

/// How a structural test refers to the element's position among its
/// siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position<'a> {
    /// `position()` and `last()` are exact: the predicate is the first
    /// bracket on a `child::*` step, or the bracket right after `[self::name]`
    /// for same-type tests.
    Exact,
    /// Count siblings explicitly, restricted to elements named by the test
    /// (`*` for any element).
    Counted(&'a str),
}

impl Position<'_> {
    /// The 1-based position expression.
    fn index(self) -> String {
        match self {
            Self::Exact => "position()".to_string(),
            Self::Counted(test) => format!("(count(preceding-sibling::{test}) + 1)"),
        }
    }

    fn first(self) -> String {
        match self {
            Self::Exact => "position()=1".to_string(),
            Self::Counted(test) => format!("not(preceding-sibling::{test})"),
        }
    }

    fn last(self) -> String {
        match self {
            Self::Exact => "position()=last()".to_string(),
            Self::Counted(test) => format!("not(following-sibling::{test})"),
        }
    }
}

/// Positions used by a sequence's structural tests.
#[derive(Debug, Clone, Copy)]
pub struct Positions<'a> {
    /// For `-child` pseudo-classes.
    pub child: Position<'a>,
    /// For `-of-type` pseudo-classes.
    pub same_type: Position<'a>,
    /// Element name of the sequence, or of the nearest enclosing one inside
    /// `:not()`.
    pub element: Option<&'a str>,
}

impl<'a> Positions<'a> {
    /// Counted positions for a sequence whose element name (if any) is
    /// `element`.
    #[must_use]
    pub fn counted(element: Option<&'a str>) -> Self {
        Self {
            child: Position::Counted("*"),
            same_type: Position::Counted(element.unwrap_or("*")),
            element,
        }
    }
}

/// [XPath 1.0 § 3.7 Lexical Structure](https://www.w3.org/TR/xpath-10/#exprlex)
///
/// A string literal for `value`. XPath 1.0 literals have no escapes, so a
/// value containing both quote characters is built with `concat()`.
#[must_use]
pub fn literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }

    let mut parts = Vec::new();
    for (index, piece) in value.split('"').enumerate() {
        if index > 0 {
            parts.push("'\"'".to_string());
        }
        if !piece.is_empty() {
            parts.push(format!("\"{piece}\""));
        }
    }
    format!("concat({})", parts.join(", "))
}

/// `" word "` membership in a whitespace-separated attribute.
fn contains_word(attribute: &str, word: &str) -> String {
    format!(
        "contains(concat(\" \", normalize-space({attribute}), \" \"), {})",
        literal(&format!(" {word} "))
    )
}

/// The predicate expression for one qualifier.
#[must_use]
pub fn qualifier(qualifier: &Qualifier, positions: Positions<'_>) -> String {
    match qualifier {
        // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
        Qualifier::Class(name) => contains_word("@class", name),
        // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
        Qualifier::Id(id) => format!("@id={}", literal(id)),
        Qualifier::Attribute(test) => attribute(test),
        Qualifier::PseudoClass(pseudo) => pseudo_class(pseudo, positions),
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
fn attribute(test: &AttributeTest) -> String {
    let (name, operator, value) = match test {
        AttributeTest::Exists { name } => return format!("@{name}"),
        AttributeTest::Match {
            name,
            operator,
            value,
        } => (name, operator, value),
    };
    let attr = format!("@{name}");
    let quoted = literal(value);

    // "If the value is the empty string, the selector does not represent
    // anything." Likewise for a `~=` word containing whitespace.
    let matches_nothing = match operator {
        AttributeOperator::Includes => value.is_empty() || value.contains(char::is_whitespace),
        AttributeOperator::Prefix | AttributeOperator::Suffix | AttributeOperator::Substring => {
            value.is_empty()
        }
        AttributeOperator::Equals | AttributeOperator::DashMatch => false,
    };
    if matches_nothing {
        return "false()".to_string();
    }

    match operator {
        AttributeOperator::Equals => format!("{attr}={quoted}"),
        AttributeOperator::Includes => contains_word(&attr, value),
        AttributeOperator::DashMatch => format!(
            "({attr}={quoted} or starts-with({attr}, {}))",
            literal(&format!("{value}-"))
        ),
        AttributeOperator::Prefix => format!("starts-with({attr}, {quoted})"),
        AttributeOperator::Suffix => format!(
            "substring({attr}, string-length({attr}) - string-length({quoted}) + 1)={quoted}"
        ),
        AttributeOperator::Substring => format!("contains({attr}, {quoted})"),
    }
}

/// [§ 14 Tree-structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
fn pseudo_class(pseudo: &PseudoClass, positions: Positions<'_>) -> String {
    let Positions {
        child,
        same_type,
        element,
    } = positions;
    match pseudo {
        PseudoClass::FirstChild => child.first(),
        PseudoClass::LastChild => child.last(),
        PseudoClass::OnlyChild => format!("{} and {}", child.first(), child.last()),
        PseudoClass::FirstOfType => same_type.first(),
        PseudoClass::LastOfType => same_type.last(),
        PseudoClass::OnlyOfType => format!("{} and {}", same_type.first(), same_type.last()),
        PseudoClass::NthChild(formula) => nth(*formula, &child.index()),
        PseudoClass::NthOfType(formula) => nth(*formula, &same_type.index()),
        PseudoClass::Not(sequence) => negation(sequence, element),
    }
}

/// [§ 4.3 The Negation Pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
///
/// Inside `not()` no bracket boundary is available, so every structural
/// test counts its siblings. Same-type tests in an unnamed argument count
/// siblings named like the enclosing sequence (`p:not(:first-of-type)`).
fn negation(sequence: &Sequence, enclosing: Option<&str>) -> String {
    let own = sequence.element_name();
    let positions = Positions::counted(own.or(enclosing));

    let mut terms: Vec<String> = own.map(|name| format!("self::{name}")).into_iter().collect();
    terms.extend(sequence.qualifiers.iter().map(|q| qualifier(q, positions)));

    if terms.is_empty() {
        // `:not(*)` excludes every element.
        return "false()".to_string();
    }
    format!("not({})", terms.join(" and "))
}

/// [§ 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Translate a formula into a test on the position expression `index`.
///
/// An element at position `p` is selected when `p = a*k + b` for some
/// integer `k >= 0`. For `a > 0` that is `(p - b) mod a = 0` with `p >= b`;
/// for `a < 0` it is `(b - p) mod |a| = 0` with `p <= b`. The `p >= b` guard is
/// dropped when `b <= a`, since every positive `p` congruent to `b` is then
/// already at least `b`.
#[must_use]
pub fn nth(formula: NthFormula, index: &str) -> String {
    let (a, b) = match formula {
        NthFormula::Even => return format!("{index} mod 2 = 0"),
        NthFormula::Odd => return format!("{index} mod 2 = 1"),
        NthFormula::Linear {
            coefficient,
            constant,
        } => (coefficient, constant),
    };

    match a {
        0 => format!("{index} = {b}"),
        1 if b > 1 => format!("{index} >= {b}"),
        1 => "true()".to_string(),
        _ if a > 1 => {
            let mut test = format!("{} mod {a} = 0", offset(index, b));
            if b > a {
                let _ = write!(test, " and {index} >= {b}");
            }
            test
        }
        _ if b < 1 => "false()".to_string(),
        -1 => format!("{index} <= {b}"),
        _ => format!("({b} - {index}) mod {} = 0 and {index} <= {b}", a.unsigned_abs()),
    }
}

/// `index - b`, written without a double sign.
fn offset(index: &str, b: i64) -> String {
    match b {
        0 => index.to_string(),
        b if b > 0 => format!("({index} - {b})"),
        b => format!("({index} + {})", b.unsigned_abs()),
    }
}
