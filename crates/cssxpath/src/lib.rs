//! CSS selector to XPath 1.0 compiler.
//!
//! The pipeline has three stages:
//!
//! - [`lexer`]: anchored regular-expression matching of one [`TokenKind`] at a
//!   time, driven by an immutable [`PatternTable`].
//! - [`parser`]: recursive descent over [`Cursor`]s, producing a
//!   [`SelectorList`].
//! - [`xpath`]: a pure function from the AST to an XPath expression.
//!
//! ```
//! let path = cssxpath::compile("ul > li:first-child").unwrap();
//! assert_eq!(
//!     path,
//!     "descendant-or-self::*/child::*[self::ul]/child::*[self::li and position()=1]"
//! );
//! ```

/// Errors reported by the compiler.
pub mod error;
/// Token matching.
pub mod lexer;
/// Compiler configuration.
pub mod options;
/// Selector parsing.
pub mod parser;
/// XPath generation.
pub mod xpath;

pub use error::{CompileError, PatternError};
pub use lexer::{Cursor, Lexer, PatternTable, TokenKind};
pub use options::{Anchor, CompileOptions, ListPolicy};
pub use parser::{
    AttributeOperator, AttributeTest, Combinator, ElementTest, MAX_NEGATION_DEPTH, NthFormula,
    Parser, PseudoClass, Qualifier, Selector, SelectorList, Sequence, SkippedSelector, Step,
};

/// A configured compiler.
///
/// Holds no mutable state; one compiler can be shared across threads and
/// used for any number of inputs.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'t> {
    parser: Parser<'t>,
    options: CompileOptions,
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl Compiler<'static> {
    /// A compiler using the built-in token patterns.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self::with_table(PatternTable::shared(), options)
    }
}

impl<'t> Compiler<'t> {
    /// A compiler that lexes with a caller-supplied pattern table.
    #[must_use]
    pub const fn with_table(table: &'t PatternTable, options: CompileOptions) -> Self {
        Self {
            parser: Parser::new(table),
            options,
        }
    }

    /// The options this compiler was built with.
    #[must_use]
    pub const fn options(&self) -> CompileOptions {
        self.options
    }

    /// Parse `input` into a selector list without generating XPath.
    ///
    /// # Errors
    ///
    /// - [`CompileError::InputTooLong`] if the input exceeds
    ///   [`CompileOptions::max_input_len`].
    /// - [`CompileError::TrailingInput`] if the list ends before the input
    ///   does.
    /// - Any parse error, subject to [`CompileOptions::list_policy`].
    pub fn parse(&self, input: &str) -> Result<SelectorList, CompileError> {
        if let Some(max) = self.options.max_input_len
            && input.len() > max
        {
            return Err(CompileError::InputTooLong {
                len: input.len(),
                max,
            });
        }

        let (list, cursor) = self
            .parser
            .parse_list(Cursor::new(input), self.options.list_policy)?;

        let cursor = self.parser.lexer().skip(TokenKind::Spaces, cursor);
        if !cursor.is_at_end() {
            return Err(CompileError::TrailingInput {
                position: cursor.offset(),
                rest: cursor.rest().to_string(),
            });
        }

        Ok(list)
    }

    /// Compile `input` into one XPath expression; a selector list becomes a
    /// union of paths.
    ///
    /// # Errors
    ///
    /// Everything [`Compiler::parse`] reports.
    pub fn compile(&self, input: &str) -> Result<String, CompileError> {
        let list = self.parse(input)?;
        Ok(xpath::generate(&list, self.options.anchor))
    }
}

/// Compile `selector` with the default options.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(selector: &str) -> Result<String, CompileError> {
    Compiler::default().compile(selector)
}
