//! Selector AST.
//!
//! Produced by the parser, consumed by [`crate::xpath`]. Every node is owned
//! by the [`SelectorList`] that contains it.

use serde::Serialize;

use crate::error::CompileError;

/// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorList {
    /// Selectors in source order.
    pub selectors: Vec<Selector>,
    /// Members left out under [`crate::ListPolicy::SkipInvalid`], in source
    /// order. Always empty under [`crate::ListPolicy::Strict`].
    #[serde(skip)]
    pub skipped: Vec<SkippedSelector>,
}

/// A list member that failed to compile and was left out of the union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSelector {
    /// The member's source text, trimmed.
    pub text: String,
    /// Why it failed.
    pub error: CompileError,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// A chain of compound selectors, stored left to right. The first step's
/// combinator is the scope relative to the evaluation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// Steps in source order; never empty.
    pub steps: Vec<Step>,
}

/// One compound selector together with the combinator that leads to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Relationship to the previous step (or to the context, for the first).
    pub combinator: Combinator,
    /// Conditions on the element selected by this step.
    pub sequence: Sequence,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Combinator {
    /// Whitespace: any descendant.
    Descendant,
    /// `>`: direct child.
    Child,
    /// `+`: the immediately following sibling.
    NextSibling,
    /// `~`: any following sibling.
    SubsequentSibling,
}

impl Combinator {
    /// Whether the step selects along the child axis, where `position()`
    /// counts the element among all children of its parent.
    #[must_use]
    pub const fn is_child_axis(self) -> bool {
        matches!(self, Self::Descendant | Self::Child)
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A sequence of simple selectors that are not separated by a combinator."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    /// Type or universal selector, if one was written.
    pub element: Option<ElementTest>,
    /// Qualifiers in encounter order.
    pub qualifiers: Vec<Qualifier>,
}

impl Sequence {
    /// The element name tested by this sequence, if it names one.
    #[must_use]
    pub fn element_name(&self) -> Option<&str> {
        match &self.element {
            Some(ElementTest::Named(name)) => Some(name),
            Some(ElementTest::Universal) | None => None,
        }
    }
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementTest {
    /// `*`
    Universal,
    /// A type selector such as `div`.
    Named(String),
}

/// One condition within a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Qualifier {
    /// `.name`: the class attribute contains the word `name`.
    Class(String),
    /// `#name`: the id attribute is exactly `name`.
    Id(String),
    /// `[...]`
    Attribute(AttributeTest),
    /// `:name` or `:name(...)`
    PseudoClass(PseudoClass),
}

/// How a qualifier chains onto the predicate built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Conjoined inside the same bracket.
    And,
    /// Evaluated in a separate bracket that only sees siblings with the same
    /// element name.
    SameType,
}

impl Qualifier {
    /// The connective used when chaining this qualifier.
    #[must_use]
    pub const fn connective(&self) -> Connective {
        match self {
            Self::PseudoClass(pseudo) if pseudo.is_same_type() => Connective::SameType,
            _ => Connective::And,
        }
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeTest {
    /// `[attr]`
    Exists {
        /// Attribute name.
        name: String,
    },
    /// `[attr op value]`
    Match {
        /// Attribute name.
        name: String,
        /// Comparison operator.
        operator: AttributeOperator,
        /// Value with quotes removed and escapes resolved.
        value: String,
    },
}

/// Attribute comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeOperator {
    /// `=` exact value.
    Equals,
    /// `~=` one of the whitespace-separated words.
    Includes,
    /// `|=` exact value or value followed by `-`.
    DashMatch,
    /// `^=` prefix.
    Prefix,
    /// `$=` suffix.
    Suffix,
    /// `*=` substring.
    Substring,
}

impl AttributeOperator {
    /// Parse the operator text produced by the lexer.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "=" => Some(Self::Equals),
            "~=" => Some(Self::Includes),
            "|=" => Some(Self::DashMatch),
            "^=" => Some(Self::Prefix),
            "$=" => Some(Self::Suffix),
            "*=" => Some(Self::Substring),
            _ => None,
        }
    }
}

/// [§ 14 Tree-structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
/// and [§ 4.3 negation](https://www.w3.org/TR/selectors-4/#negation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PseudoClass {
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:only-child`
    OnlyChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:last-of-type`
    LastOfType,
    /// `:only-of-type`
    OnlyOfType,
    /// `:nth-child(an+b)`
    NthChild(NthFormula),
    /// `:nth-of-type(an+b)`
    NthOfType(NthFormula),
    /// `:not(sequence)`
    Not(Box<Sequence>),
}

impl PseudoClass {
    /// The pseudo-class name as written in CSS, without the colon.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::OnlyChild => "only-child",
            Self::FirstOfType => "first-of-type",
            Self::LastOfType => "last-of-type",
            Self::OnlyOfType => "only-of-type",
            Self::NthChild(_) => "nth-child",
            Self::NthOfType(_) => "nth-of-type",
            Self::Not(_) => "not",
        }
    }

    /// Whether position is counted among siblings of the same element name.
    #[must_use]
    pub const fn is_same_type(&self) -> bool {
        matches!(
            self,
            Self::FirstOfType | Self::LastOfType | Self::OnlyOfType | Self::NthOfType(_)
        )
    }
}

/// [§ 14.1 An+B notation](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// "The An+B notation defines an integer step (A) and offset (B), and
/// represents the An+Bth elements in a list, for every positive integer or
/// zero value of n, with the first element in the list having index 1."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NthFormula {
    /// `odd`, same as `2n+1`.
    Odd,
    /// `even`, same as `2n`.
    Even,
    /// `an+b`; a zero coefficient selects the single position `constant`.
    Linear {
        /// A
        coefficient: i64,
        /// B
        constant: i64,
    },
}

impl NthFormula {
    /// Whether the 1-based `position` is selected by this formula.
    #[must_use]
    pub const fn matches(self, position: i64) -> bool {
        if position < 1 {
            return false;
        }
        match self {
            Self::Odd => position % 2 == 1,
            Self::Even => position % 2 == 0,
            Self::Linear {
                coefficient: 0,
                constant,
            } => position == constant,
            Self::Linear {
                coefficient,
                constant,
            } => {
                let Some(delta) = position.checked_sub(constant) else {
                    return false;
                };
                matches!(delta.checked_rem(coefficient), Some(0))
                    && (delta == 0 || (delta > 0) == (coefficient > 0))
            }
        }
    }
}
