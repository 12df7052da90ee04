//! One-shot compiler from pattern text to the tree in [`ast`](super::ast).
//!
//! Well-formedness (balanced `(`/`)`, every `[` closed by a `]`) is checked
//! here, before any matching begins, so a malformed pattern fails for every
//! subject, including the empty string.

use thiserror::Error;

use super::ast::{Element, Item, Pattern, Quantifier, Sequence};

/// Errors raised while compiling a pattern.
///
/// Positions are character offsets into the original pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unmatched '(' at position {position}")]
    UnbalancedGroup { position: usize },
    #[error("unterminated '[' at position {position}")]
    UnterminatedClass { position: usize },
}

/// Compile `pattern` into a [`Pattern`] tree.
pub fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let anchored = chars.first() == Some(&'^');
    let start = usize::from(anchored);
    let root = compile_sequence(&chars, start, chars.len())?;
    Ok(Pattern { anchored, root })
}

/// Compile the pattern text in `chars[start..end]` into a [`Sequence`].
///
/// Called recursively for group alternative bodies; error positions stay
/// relative to the whole pattern because the full character buffer is
/// threaded through with absolute ranges.
fn compile_sequence(chars: &[char], start: usize, end: usize) -> Result<Sequence, PatternError> {
    let mut items = Vec::new();
    let mut i = start;
    while i < end {
        // `$` is an anchor only as the last character of this sequence;
        // anywhere else it falls through to an ordinary literal.
        if chars[i] == '$' && i + 1 == end {
            items.push(Item {
                quantifier: Quantifier::Once,
                element: Element::EndAnchor,
            });
            break;
        }

        let (element, after) = match chars[i] {
            '(' => {
                let close = find_closing_paren(chars, i, end)
                    .ok_or(PatternError::UnbalancedGroup { position: i })?;
                let mut alternatives = Vec::new();
                for (lo, hi) in split_alternatives(chars, i + 1, close) {
                    alternatives.push(compile_sequence(chars, lo, hi)?);
                }
                (Element::Group(alternatives), close + 1)
            }
            '[' => {
                let close = (i + 1..end)
                    .find(|&j| chars[j] == ']')
                    .ok_or(PatternError::UnterminatedClass { position: i })?;
                let negated = i + 1 < close && chars[i + 1] == '^';
                let body = if negated { i + 2 } else { i + 1 };
                (
                    Element::CharClass {
                        chars: chars[body..close].to_vec(),
                        negated,
                    },
                    close + 1,
                )
            }
            '\\' if i + 1 < end && chars[i + 1] == 'd' => (Element::Digit, i + 2),
            '\\' if i + 1 < end && chars[i + 1] == 'w' => (Element::Word, i + 2),
            '\\' => {
                // Not a recognized escape: the backslash is a plain literal
                // and the next character is tokenized on its own, so no
                // quantifier ever attaches to the backslash itself.
                items.push(Item {
                    quantifier: Quantifier::Once,
                    element: Element::Literal('\\'),
                });
                i += 1;
                continue;
            }
            '.' => (Element::Wildcard, i + 1),
            // Covers quantifier characters with no preceding unit, which
            // are ordinary literals.
            c => (Element::Literal(c), i + 1),
        };

        let (quantifier, next) = if after < end {
            match chars[after] {
                '*' => (Quantifier::ZeroOrMore, after + 1),
                '+' => (Quantifier::OneOrMore, after + 1),
                '?' => (Quantifier::ZeroOrOne, after + 1),
                _ => (Quantifier::Once, after),
            }
        } else {
            (Quantifier::Once, after)
        };
        items.push(Item {
            quantifier,
            element,
        });
        i = next;
    }
    Ok(Sequence { items })
}

/// Locate the `)` matching the `(` at `open`, scanning no further than `end`.
///
/// Increments a depth counter on `(` and decrements on `)`; returns the index
/// where the depth returns to zero. `None` signals an unbalanced group.
fn find_closing_paren(chars: &[char], open: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().take(end).skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a group body into its top-level alternatives.
///
/// Independent depth counters for parentheses and brackets ensure a `|`
/// inside a nested group or a character class never splits. Sub-branch text
/// is preserved verbatim, in declaration order; an empty body yields a
/// single empty alternative.
fn split_alternatives(chars: &[char], start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut parts = Vec::new();
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut part_start = start;
    for i in start..end {
        match chars[i] {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '|' if paren_depth == 0 && bracket_depth == 0 => {
                parts.push((part_start, i));
                part_start = i + 1;
            }
            _ => {}
        }
    }
    parts.push((part_start, end));
    parts
}
