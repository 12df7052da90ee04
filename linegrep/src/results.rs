//! Search result types.

use std::path::PathBuf;

/// A single matching line in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// 1-based line number of the match.
    pub line_number: usize,
    /// The matching line, line terminator stripped.
    pub line: String,
}

/// All matches found in a single file.
#[derive(Debug, Clone)]
pub struct FileResult {
    /// The path to the file.
    pub path: PathBuf,
    /// Matching lines, in file order.
    pub matches: Vec<Match>,
}

/// Aggregate results of one search invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchOutput {
    /// Per-file results; only files with at least one match are retained.
    pub file_results: Vec<FileResult>,
    /// Total number of matching lines.
    pub total_matches: usize,
    /// Total number of files searched, matching or not.
    pub files_searched: usize,
    /// Number of files with at least one match.
    pub files_with_matches: usize,
}

impl SearchOutput {
    /// Creates a new empty search output.
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the result of searching one file.
    pub fn add_file_result(&mut self, file_result: FileResult) {
        self.files_searched += 1;
        if !file_result.matches.is_empty() {
            self.total_matches += file_result.matches.len();
            self.files_with_matches += 1;
            self.file_results.push(file_result);
        }
    }

    /// Merges another search output into this one.
    pub fn merge(&mut self, other: SearchOutput) {
        self.total_matches += other.total_matches;
        self.files_searched += other.files_searched;
        self.files_with_matches += other.files_with_matches;
        self.file_results.extend(other.file_results);
    }
}
