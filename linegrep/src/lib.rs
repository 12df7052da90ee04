//! linegrep: line-oriented text search built on a small hand-written
//! pattern-matching engine.
//!
//! The [`pattern`] module is the core — a compile-once, match-many engine
//! for a small regular-expression-like language. The rest of the library is
//! the glue that feeds it lines from files, directories, and readers.

pub mod config;
pub mod errors;
pub mod pattern;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use pattern::{compile, match_line, Pattern, PatternError};
pub use results::{FileResult, Match, SearchOutput};
pub use search::search;
