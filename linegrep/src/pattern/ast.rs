//! Compiled representation of linegrep patterns.

/// A compiled pattern, ready to be matched against lines.
///
/// Produced by [`compile`](super::parser::compile), matched with
/// [`Pattern::matches`]. The tree is immutable, so one compiled pattern can
/// be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// True when the pattern source began with `^`. An anchored pattern is
    /// tried once at position 0 and must consume the whole line.
    pub anchored: bool,
    /// The top-level sequence (the pattern body after any leading `^`).
    pub root: Sequence,
}

/// A concatenation of quantified elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    pub items: Vec<Item>,
}

/// One element together with its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub quantifier: Quantifier,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Once,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

/// A single matchable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Exact character equality.
    Literal(char),
    /// `.` — any one character.
    Wildcard,
    /// `$` at the end of a sequence — matches only at end of line,
    /// consuming nothing.
    EndAnchor,
    /// `\d` — one ASCII digit.
    Digit,
    /// `\w` — one alphanumeric character or `_`.
    Word,
    /// `[...]` — a literal set of characters, optionally negated.
    CharClass { chars: Vec<char>, negated: bool },
    /// `(...)` — alternatives in declaration order; order is significant.
    Group(Vec<Sequence>),
}
