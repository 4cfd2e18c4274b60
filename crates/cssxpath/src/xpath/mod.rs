//! XPath 1.0 generation.
//!
//! [XPath 1.0 § 2 Location Paths](https://www.w3.org/TR/xpath-10/#location-paths)
//!
//! Each selector becomes one location path with one location step per
//! compound selector, and a selector list becomes the union of those paths.
//!
//! Structural pseudo-classes need care because `position()` inside a
//! predicate counts nodes on the step's axis, and only the nodes that
//! passed earlier predicates. On a `child::*` step the first bracket sees
//! all children, so `position()` is the child index there. A bracket after
//! `[self::name]` sees only children named `name`, which is exactly the
//! same-type index. Everywhere else (sibling axes, later brackets, inside
//! `not()`) the index is computed by counting preceding siblings.

/// Predicate expressions for qualifiers.
pub mod predicate;

use std::fmt::Write as _;

use crate::options::Anchor;
use crate::parser::ast::{Combinator, Connective, Selector, SelectorList, Step};
use predicate::{Position, Positions};

/// Separator between the paths of a selector list.
pub const UNION: &str = " | ";

/// Translate a parsed selector list into a single XPath expression.
#[must_use]
pub fn generate(list: &SelectorList, anchor: Anchor) -> String {
    list.selectors
        .iter()
        .map(|selector| generate_selector(selector, anchor))
        .collect::<Vec<_>>()
        .join(UNION)
}

/// Translate one selector into a location path.
#[must_use]
pub fn generate_selector(selector: &Selector, anchor: Anchor) -> String {
    let mut path = String::new();
    if anchor == Anchor::Document {
        path.push('/');
    }

    for (index, step) in selector.steps.iter().enumerate() {
        if index > 0 {
            path.push('/');
        }
        write_step(&mut path, step);
    }
    path
}

/// The axis part of a step, before any predicate.
const fn axis(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::Descendant => "descendant-or-self::*/child::*",
        Combinator::Child => "child::*",
        Combinator::NextSibling => "following-sibling::*[position()=1]",
        Combinator::SubsequentSibling => "following-sibling::*",
    }
}

fn write_step(path: &mut String, step: &Step) {
    path.push_str(axis(step.combinator));

    let sequence = &step.sequence;
    let element = sequence.element_name();
    let name_test = element.map(|name| format!("self::{name}"));

    let has_same_type = sequence
        .qualifiers
        .iter()
        .any(|q| q.connective() == Connective::SameType);

    if !step.combinator.is_child_axis() {
        let positions = Positions::counted(element);
        let terms = name_test
            .into_iter()
            .chain(sequence.qualifiers.iter().map(|q| predicate::qualifier(q, positions)));
        write_bracket(path, terms);
        return;
    }

    if !has_same_type {
        let positions = Positions {
            child: Position::Exact,
            same_type: Position::Counted(element.unwrap_or("*")),
            element,
        };
        let terms = name_test
            .into_iter()
            .chain(sequence.qualifiers.iter().map(|q| predicate::qualifier(q, positions)));
        write_bracket(path, terms);
        return;
    }

    // [self::name][same-type tests][everything else]
    let same_type = Positions {
        child: Position::Counted("*"),
        same_type: Position::Exact,
        element,
    };
    let others = Positions::counted(element);
    let (typed, rest): (Vec<_>, Vec<_>) = sequence
        .qualifiers
        .iter()
        .partition(|q| q.connective() == Connective::SameType);

    write_bracket(path, name_test);
    write_bracket(path, typed.into_iter().map(|q| predicate::qualifier(q, same_type)));
    write_bracket(path, rest.into_iter().map(|q| predicate::qualifier(q, others)));
}

/// Append `[t1 and t2 ...]`, or nothing when there are no terms.
fn write_bracket(path: &mut String, terms: impl IntoIterator<Item = String>) {
    let terms: Vec<String> = terms.into_iter().collect();
    if terms.is_empty() {
        return;
    }
    let _ = write!(path, "[{}]", terms.join(" and "));
}
