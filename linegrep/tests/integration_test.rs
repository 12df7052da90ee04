use anyhow::Result;
use linegrep::{search, SearchConfig, SearchError};
use std::fs::{self, File};
use std::io::Write;
use std::num::NonZeroUsize;
use tempfile::tempdir;

fn create_test_files(dir: &tempfile::TempDir, file_count: usize, lines_per_file: usize) -> Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(file, "line {} in file {}: I see 1 cat", j, i)?;
            writeln!(file, "another line {} in file {}: nothing special", j, i)?;
        }
    }
    Ok(())
}

fn config_for(dir: &tempfile::TempDir, pattern: &str) -> SearchConfig {
    SearchConfig {
        pattern: pattern.to_string(),
        paths: fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect(),
        recursive: false,
        thread_count: NonZeroUsize::new(2).unwrap(),
        log_level: "warn".to_string(),
    }
}

#[test]
fn test_search_multiple_files() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 4, 5)?;

    let result = search(&config_for(&dir, r"\d (cat|dog)s?"))?;
    assert_eq!(result.files_searched, 4);
    assert_eq!(result.files_with_matches, 4);
    assert_eq!(result.total_matches, 4 * 5);
    Ok(())
}

#[test]
fn test_search_without_matches() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 2, 3)?;

    let result = search(&config_for(&dir, "zebra"))?;
    assert_eq!(result.files_searched, 2);
    assert_eq!(result.files_with_matches, 0);
    assert_eq!(result.total_matches, 0);
    assert!(result.file_results.is_empty());
    Ok(())
}

#[test]
fn test_recursive_search() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/b"))?;
    fs::write(dir.path().join("top.txt"), "a cat here\n")?;
    fs::write(dir.path().join("a/mid.txt"), "no animals\n")?;
    fs::write(dir.path().join("a/b/deep.txt"), "a dog there\na cat too\n")?;

    let config = SearchConfig {
        pattern: "a (cat|dog)".to_string(),
        paths: vec![dir.path().to_path_buf()],
        recursive: true,
        thread_count: NonZeroUsize::new(2).unwrap(),
        log_level: "warn".to_string(),
    };
    let result = search(&config)?;
    assert_eq!(result.files_searched, 3);
    assert_eq!(result.files_with_matches, 2);
    assert_eq!(result.total_matches, 3);
    Ok(())
}

#[test]
fn test_directory_without_recursive_is_skipped() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("file.txt"), "a cat\n")?;

    let config = SearchConfig {
        pattern: "cat".to_string(),
        paths: vec![dir.path().to_path_buf()],
        recursive: false,
        thread_count: NonZeroUsize::new(2).unwrap(),
        log_level: "warn".to_string(),
    };
    let result = search(&config)?;
    assert_eq!(result.files_searched, 0);
    assert_eq!(result.total_matches, 0);
    Ok(())
}

#[test]
fn test_missing_file_is_skipped() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("real.txt"), "a cat\n")?;

    let config = SearchConfig {
        pattern: "cat".to_string(),
        paths: vec![
            dir.path().join("real.txt"),
            dir.path().join("missing.txt"),
        ],
        recursive: false,
        thread_count: NonZeroUsize::new(2).unwrap(),
        log_level: "warn".to_string(),
    };
    let result = search(&config)?;
    assert_eq!(result.files_searched, 1);
    assert_eq!(result.total_matches, 1);
    Ok(())
}

#[test]
fn test_invalid_pattern_fails_before_any_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 1, 1)?;

    let err = search(&config_for(&dir, "(unclosed")).expect_err("pattern should be rejected");
    assert!(matches!(err, SearchError::Pattern(_)));
    Ok(())
}

#[test]
fn test_anchored_pattern_across_files() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("log.txt"), "I see 1 cat, 2 dogs and 3 cows\nI see 1 cat 2 dogs 3 cows\n")?;

    let config = SearchConfig {
        pattern: r"^I see (\d (cat|dog|cow)s?(, | and )?)+$".to_string(),
        paths: vec![dir.path().join("log.txt")],
        recursive: false,
        thread_count: NonZeroUsize::new(1).unwrap(),
        log_level: "warn".to_string(),
    };
    let result = search(&config)?;
    assert_eq!(result.total_matches, 1);
    assert_eq!(
        result.file_results[0].matches[0].line,
        "I see 1 cat, 2 dogs and 3 cows"
    );
    Ok(())
}
