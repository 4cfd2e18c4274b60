//! Compiler configuration.

/// Where generated paths start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Relative to the context node: `descendant-or-self::*/child::*[...]`.
    #[default]
    Context,
    /// From the document root: `/descendant-or-self::*/child::*[...]`.
    Document,
}

/// What to do with a selector in a list that fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPolicy {
    /// The first failing selector fails the whole list.
    #[default]
    Strict,
    /// Failing selectors are left out of the union and recorded in
    /// [`crate::SelectorList::skipped`]. The list still fails if no selector
    /// compiles.
    SkipInvalid,
}

/// Options for [`crate::Compiler`].
///
/// ```
/// use cssxpath::{Anchor, CompileOptions, ListPolicy};
///
/// let options = CompileOptions::default()
///     .with_anchor(Anchor::Document)
///     .with_list_policy(ListPolicy::SkipInvalid)
///     .with_max_input_len(Some(4096));
/// assert_eq!(options.anchor, Anchor::Document);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    /// Where generated paths start.
    pub anchor: Anchor,
    /// Handling of failing selectors in a list.
    pub list_policy: ListPolicy,
    /// Inputs longer than this many bytes are rejected before parsing.
    pub max_input_len: Option<usize>,
}

impl CompileOptions {
    /// Set [`CompileOptions::anchor`].
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set [`CompileOptions::list_policy`].
    #[must_use]
    pub const fn with_list_policy(mut self, list_policy: ListPolicy) -> Self {
        self.list_policy = list_policy;
        self
    }

    /// Set [`CompileOptions::max_input_len`].
    #[must_use]
    pub const fn with_max_input_len(mut self, max_input_len: Option<usize>) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}
