//! Errors reported while compiling a selector.

use thiserror::Error;

/// A selector that could not be translated.
///
/// Every variant carries the byte offset into the original input where the
/// problem was detected, so callers can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A mandatory token (sequence, closing bracket or parenthesis, formula
    /// constant) is absent at `position`.
    #[error("expected {expected} at offset {position}")]
    UnexpectedToken {
        /// Byte offset of the cursor when the token was expected.
        position: usize,
        /// Human-readable name of the expected construct.
        expected: &'static str,
    },

    /// A pseudo-class that is well-formed but has no XPath translation.
    #[error("unsupported pseudo-class `:{name}` at offset {position}")]
    UnsupportedPseudoClass {
        /// Byte offset of the `:` that introduces the pseudo-class.
        position: usize,
        /// Pseudo-class name without the leading colon.
        name: String,
    },

    /// An attribute comparison operator outside the supported set.
    #[error("unsupported attribute operator `{operator}` at offset {position}")]
    UnsupportedAttributeOperator {
        /// Byte offset of the operator.
        position: usize,
        /// The operator text as written.
        operator: String,
    },

    /// `:not()` nested more deeply than the compiler supports.
    #[error("`:not()` nested more than {limit} levels deep at offset {position}")]
    NestingTooDeep {
        /// Byte offset of the `:not` that exceeds the limit.
        position: usize,
        /// Maximum nesting depth.
        limit: usize,
    },

    /// The selector list ended before the end of the input.
    #[error("unexpected trailing input `{rest}` at offset {position}")]
    TrailingInput {
        /// Byte offset of the first unconsumed character.
        position: usize,
        /// The unconsumed input.
        rest: String,
    },

    /// The input exceeds the configured length cap.
    #[error("selector is {len} bytes long, limit is {max}")]
    InputTooLong {
        /// Input length in bytes.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl CompileError {
    /// Byte offset into the input where the error was detected.
    ///
    /// For [`CompileError::InputTooLong`] this is the configured limit, the
    /// first byte past the accepted prefix.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnsupportedPseudoClass { position, .. }
            | Self::UnsupportedAttributeOperator { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::TrailingInput { position, .. } => *position,
            Self::InputTooLong { max, .. } => *max,
        }
    }
}

/// A token pattern that failed to compile.
#[derive(Debug, Error)]
#[error("invalid pattern for {kind} token: {source}")]
pub struct PatternError {
    /// Name of the token kind whose pattern was rejected.
    pub kind: &'static str,
    /// The underlying regex build error.
    #[source]
    pub source: regex_automata::meta::BuildError,
}
