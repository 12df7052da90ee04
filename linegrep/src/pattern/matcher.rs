//! The matching engine: walks a compiled [`Pattern`] over a line of text.
//!
//! All positions are character (not byte) indices. The engine is a pure
//! recursive function of its arguments; repetition is driven by explicit
//! loops, so recursion depth tracks pattern nesting, never subject length.
//!
//! Choice points are resolved first-feasible: a group commits to the first
//! alternative that matches locally, and a quantifier commits to the first
//! repetition count whose continuation succeeds. There is no exhaustive
//! backtracking, so a pattern like `(a|ab)c` rejects `"abc"` even though a
//! conventional regex engine would accept it.

use super::ast::{Element, Item, Pattern, Quantifier};
use super::parser::{compile, PatternError};

impl Pattern {
    /// Decide whether the pattern matches anywhere in `line`.
    ///
    /// An anchored pattern (`^...`) is tried once at position 0 and matches
    /// only if it also consumes the whole line, whether or not an explicit
    /// `$` is present. Any other pattern is tried at every start offset and
    /// succeeds at the first offset with a match, whatever its length.
    pub fn matches(&self, line: &str) -> bool {
        let text: Vec<char> = line.chars().collect();
        if self.anchored {
            return match_sequence(&text, &self.root.items, 0) == Some(text.len());
        }
        (0..=text.len()).any(|offset| match_sequence(&text, &self.root.items, offset).is_some())
    }
}

/// Compile `pattern` and match it against a single line.
///
/// One-shot convenience for callers that do not reuse the compiled pattern.
pub fn match_line(line: &str, pattern: &str) -> Result<bool, PatternError> {
    Ok(compile(pattern)?.matches(line))
}

/// Match the items of a sequence against `text` starting at `pos`.
///
/// Returns the end position of the match, or `None`. An empty item list
/// always matches, consuming nothing.
fn match_sequence(text: &[char], items: &[Item], pos: usize) -> Option<usize> {
    let Some((item, rest)) = items.split_first() else {
        return Some(pos);
    };
    match item.quantifier {
        Quantifier::Once => {
            let end = match_element_once(text, &item.element, pos)?;
            match_sequence(text, rest, end)
        }
        Quantifier::ZeroOrOne => {
            // Each locally-successful occurrence attempt is continued with
            // the rest of the sequence; only if none leads to an overall
            // success does the zero-occurrence fallback apply.
            for end in occurrence_attempts(text, &item.element, pos) {
                if let Some(done) = match_sequence(text, rest, end) {
                    return Some(done);
                }
            }
            match_sequence(text, rest, pos)
        }
        Quantifier::ZeroOrMore => {
            if let Some(done) = match_sequence(text, rest, pos) {
                return Some(done);
            }
            extend_repeatedly(text, item, rest, pos)
        }
        Quantifier::OneOrMore => extend_repeatedly(text, item, rest, pos),
    }
}

/// Greedy extension loop shared by `*` and `+`: consume one occurrence at a
/// time, checking the continuation after every extension. The caller handles
/// the zero-occurrence case of `*` before entering the loop, so the first
/// occurrence here is always mandatory.
fn extend_repeatedly(text: &[char], item: &Item, rest: &[Item], pos: usize) -> Option<usize> {
    let mut cur = pos;
    loop {
        let next = match_element_once(text, &item.element, cur)?;
        if next == cur {
            // Zero-width occurrence: extending further would never advance.
            return None;
        }
        cur = next;
        if let Some(done) = match_sequence(text, rest, cur) {
            return Some(done);
        }
    }
}

/// End positions of every locally-successful single occurrence at `pos`, in
/// tie-break order. A group yields one entry per matching alternative; every
/// other element yields at most one.
fn occurrence_attempts(text: &[char], element: &Element, pos: usize) -> Vec<usize> {
    match element {
        Element::Group(alternatives) => alternatives
            .iter()
            .filter_map(|alt| match_sequence(text, &alt.items, pos))
            .collect(),
        _ => match_element_once(text, element, pos).into_iter().collect(),
    }
}

/// Match a single occurrence of `element` at `pos`, returning the position
/// after it. A group commits to the first alternative that matches, in
/// declaration order.
fn match_element_once(text: &[char], element: &Element, pos: usize) -> Option<usize> {
    match element {
        Element::Literal(c) => (text.get(pos) == Some(c)).then(|| pos + 1),
        Element::Wildcard => (pos < text.len()).then(|| pos + 1),
        Element::EndAnchor => (pos == text.len()).then_some(pos),
        Element::Digit => match_one(text, pos, |c| c.is_ascii_digit()),
        Element::Word => match_one(text, pos, |c| c.is_alphanumeric() || c == '_'),
        Element::CharClass { chars, negated } => {
            match_one(text, pos, |c| chars.contains(&c) != *negated)
        }
        Element::Group(alternatives) => alternatives
            .iter()
            .find_map(|alt| match_sequence(text, &alt.items, pos)),
    }
}

fn match_one(text: &[char], pos: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    (pos < text.len() && pred(text[pos])).then(|| pos + 1)
}
