//! File and directory search built on the pattern engine.
//!
//! Every function here is glue: read lines, call [`Pattern::matches`] once
//! per line, aggregate the boolean results. A compiled pattern is shared
//! across files and threads; matching itself stays single-threaded per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::pattern::{compile, Pattern};
use crate::results::{FileResult, Match, SearchOutput};

/// Expand shell-style glob patterns among file arguments.
///
/// Arguments without glob metacharacters pass through untouched. A pattern
/// that matches nothing is kept verbatim so the caller reports it as a
/// missing file, mirroring the shell's no-match behavior.
pub fn expand_file_patterns(args: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            files.push(PathBuf::from(arg));
            continue;
        }
        let expanded: Vec<PathBuf> = match glob::glob(arg) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                debug!("bad glob pattern {arg}: {e}");
                Vec::new()
            }
        };
        if expanded.is_empty() {
            files.push(PathBuf::from(arg));
        } else {
            debug!("expanded {arg} to {} files", expanded.len());
            files.extend(expanded);
        }
    }
    files
}

/// Match `pattern` against every line read from `reader`.
pub fn search_lines<R: BufRead>(reader: R, pattern: &Pattern) -> SearchResult<Vec<Match>> {
    let mut matches = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if pattern.matches(&line) {
            matches.push(Match {
                line_number: idx + 1,
                line,
            });
        }
    }
    Ok(matches)
}

/// Search a single file line by line.
///
/// I/O failures are translated into the corresponding [`SearchError`]
/// variants; the caller decides whether they are fatal, a diagnostic, or a
/// silent skip.
pub fn search_file(path: &Path, pattern: &Pattern) -> SearchResult<FileResult> {
    trace!("searching file: {}", path.display());
    if path.is_dir() {
        return Err(SearchError::is_a_directory(path));
    }
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SearchError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
        _ => SearchError::Io(e),
    })?;
    let matches = search_lines(BufReader::new(file), pattern)?;
    debug!("found {} matches in {}", matches.len(), path.display());
    Ok(FileResult {
        path: path.to_path_buf(),
        matches,
    })
}

/// Search every regular file under `dir`, in parallel.
///
/// The walk visits everything, hidden files included, and silently skips
/// files that cannot be read — an unreadable file during a recursive scan is
/// not worth aborting the whole search for.
pub fn search_directory(dir: &Path, pattern: &Pattern) -> SearchOutput {
    debug!("walking directory: {}", dir.display());
    let mut builder = WalkBuilder::new(dir);
    builder.standard_filters(false).follow_links(false);

    let files: Vec<PathBuf> = builder
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .collect();
    info!("found {} files under {}", files.len(), dir.display());

    let results: Vec<FileResult> = files
        .par_iter()
        .map(|path| search_file(path, pattern))
        .filter_map(|result| match result {
            Ok(file_result) => Some(file_result),
            Err(e) => {
                debug!("skipping unreadable file: {e}");
                None
            }
        })
        .collect();

    let mut output = SearchOutput::new();
    for file_result in results {
        output.add_file_result(file_result);
    }
    output
}

/// Run a full search as described by `config`.
///
/// Compiles the pattern once (a syntax failure aborts before any file is
/// touched), then fans out over the configured paths on a thread pool of
/// `config.thread_count` workers. Unreadable paths are logged and skipped;
/// a directory encountered without `recursive` is skipped with a warning.
pub fn search(config: &SearchConfig) -> SearchResult<SearchOutput> {
    info!("starting search with pattern: {}", config.pattern);
    let pattern = compile(&config.pattern)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| SearchError::config(e.to_string()))?;

    let output = pool.install(|| {
        let mut output = SearchOutput::new();
        for path in &config.paths {
            if path.is_dir() {
                if config.recursive {
                    output.merge(search_directory(path, &pattern));
                } else {
                    warn!("{}: is a directory (not searched without recursive)", path.display());
                }
            } else {
                match search_file(path, &pattern) {
                    Ok(file_result) => output.add_file_result(file_result),
                    Err(e) => warn!("skipping {}: {e}", path.display()),
                }
            }
        }
        output
    });

    info!(
        "search completed: {} matches in {} files",
        output.total_matches, output.files_with_matches
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn pattern(text: &str) -> Pattern {
        compile(text).expect("pattern should compile")
    }

    #[test]
    fn test_search_lines_numbers_matches() -> anyhow::Result<()> {
        let input = Cursor::new("a cat\nnothing here\na dog\n");
        let matches = search_lines(input, &pattern("a (cat|dog)"))?;
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[0].line, "a cat");
        assert_eq!(matches[1].line_number, 3);
        Ok(())
    }

    #[test]
    fn test_search_file_collects_matching_lines() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, "1 cat\nno animals\n2 dogs\n")?;

        let result = search_file(&path, &pattern(r"\d (cat|dog)s?"))?;
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[1].line, "2 dogs");
        Ok(())
    }

    #[test]
    fn test_search_file_missing_is_not_found() {
        let err = search_file(Path::new("/no/such/file.txt"), &pattern("x"))
            .expect_err("missing file should fail");
        assert!(matches!(err, SearchError::FileNotFound(_)));
    }

    #[test]
    fn test_search_file_rejects_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let err = search_file(dir.path(), &pattern("x")).expect_err("directory should fail");
        assert!(matches!(err, SearchError::IsADirectory(_)));
        Ok(())
    }

    #[test]
    fn test_expand_passes_plain_arguments_through() {
        let args = vec!["plain.txt".to_string(), "dir/other.log".to_string()];
        assert_eq!(
            expand_file_patterns(&args),
            vec![PathBuf::from("plain.txt"), PathBuf::from("dir/other.log")]
        );
    }

    #[test]
    fn test_expand_glob_pattern() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "")?;
        fs::write(dir.path().join("b.txt"), "")?;
        fs::write(dir.path().join("c.log"), "")?;

        let glob_arg = dir.path().join("*.txt").to_string_lossy().into_owned();
        let mut expanded = expand_file_patterns(&[glob_arg]);
        expanded.sort();
        assert_eq!(
            expanded,
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
        Ok(())
    }

    #[test]
    fn test_expand_keeps_unmatched_pattern() {
        let args = vec!["/no/such/dir/*.txt".to_string()];
        assert_eq!(
            expand_file_patterns(&args),
            vec![PathBuf::from("/no/such/dir/*.txt")]
        );
    }

    #[test]
    fn test_search_directory_recurses_and_skips_nothing_readable() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("top.txt"), "a cat\n")?;
        fs::write(dir.path().join("sub/deep.txt"), "a dog\nplain line\n")?;

        let output = search_directory(dir.path(), &pattern("a (cat|dog)"));
        assert_eq!(output.total_matches, 2);
        assert_eq!(output.files_with_matches, 2);
        assert_eq!(output.files_searched, 2);
        Ok(())
    }
}
