//! The linegrep pattern-matching engine.
//!
//! Patterns are a small regular-expression-like language. A pattern is
//! compiled once into an immutable tree ([`Pattern`]) and can then be
//! matched against any number of lines, from any number of threads.
//!
//! # Pattern syntax
//!
//! | Syntax    | Meaning                                                  |
//! |-----------|----------------------------------------------------------|
//! | `a`       | Literal character                                        |
//! | `.`       | Any one character                                        |
//! | `^`       | Start anchor (first character only; the match must also consume the whole line) |
//! | `$`       | End anchor, when it is the last character of the pattern or of a group alternative; a literal `$` anywhere else |
//! | `x*`      | Zero or more of the preceding unit                       |
//! | `x+`      | One or more of the preceding unit                        |
//! | `x?`      | Zero or one of the preceding unit                        |
//! | `[abc]`   | One character from the set (no ranges; `a-z` is the three characters `a`, `-`, `z`) |
//! | `[^abc]`  | One character not in the set                             |
//! | `\d`      | One ASCII digit                                          |
//! | `\w`      | One alphanumeric character or `_`                        |
//! | `(a\|b)`  | Group with alternatives, tried in declaration order      |
//!
//! Any other backslash sequence is not an escape: the backslash matches a
//! literal `\` and the following character is handled on its own. A
//! quantifier character with no preceding unit is an ordinary literal.

pub mod ast;
pub mod matcher;
pub mod parser;

pub use ast::Pattern;
pub use matcher::match_line;
pub use parser::{compile, PatternError};
