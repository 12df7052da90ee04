use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use linegrep::search::{expand_file_patterns, search_directory, search_file, search_lines};
use linegrep::{compile, Pattern, SearchConfig, SearchError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit codes mirror grep: 0 = matches found, 1 = none, 2 = error.
const EXIT_MATCH: u8 = 0;
const EXIT_NO_MATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(
    name = "linegrep",
    version,
    about = "Search for pattern matches in files, directories, or stdin"
)]
struct Cli {
    /// The pattern to search for.
    #[arg(short = 'E', value_name = "PATTERN", required = true)]
    pattern: String,

    /// Files and directories to search; stdin is read when omitted.
    /// Glob patterns are expanded in non-recursive mode.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Recurse into directories.
    #[arg(short = 'r', long, visible_short_alias = 'R')]
    recursive: bool,

    /// Number of worker threads for multi-file searches.
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Path to a YAML config file (default: .linegrep.yaml if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("linegrep: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = SearchConfig::load_from(cli.config.as_deref())?;
    config.pattern = cli.pattern;
    config.recursive = config.recursive || cli.recursive;
    if let Some(threads) = cli.threads {
        config.thread_count = threads;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let pattern = compile(&config.pattern).map_err(SearchError::from)?;
    debug!("searching with pattern: {}", config.pattern);

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build_global()
        .context("failed to initialize thread pool")?;

    if cli.files.is_empty() {
        let matches = search_lines(io::stdin().lock(), &pattern)?;
        for m in &matches {
            println!("{}", m.line);
        }
        return Ok(exit_code(matches.len()));
    }

    let mut total_matches = 0usize;

    if config.recursive {
        // Recursive mode always prefixes matches with their file.
        for file_or_dir in &cli.files {
            let path = PathBuf::from(file_or_dir);
            if path.is_dir() {
                let output = search_directory(&path, &pattern);
                for file_result in &output.file_results {
                    for m in &file_result.matches {
                        println!("{}:{}", file_result.path.display(), m.line);
                    }
                }
                total_matches += output.total_matches;
            } else {
                // Explicit file arguments are searched as plain files even
                // in recursive mode.
                total_matches += print_file_matches(&path, &pattern, true);
            }
        }
    } else {
        // With several sources after glob expansion every match is prefixed
        // with its file; a single file prints bare lines.
        let files = expand_file_patterns(&cli.files);
        let multiple_sources = files.len() > 1;
        for path in &files {
            total_matches += print_file_matches(path, &pattern, multiple_sources);
        }
    }

    Ok(exit_code(total_matches))
}

/// Search one file, print its matches, and return how many there were.
/// I/O failures become a diagnostic on stderr and contribute no matches.
fn print_file_matches(path: &Path, pattern: &Pattern, with_path: bool) -> usize {
    match search_file(path, pattern) {
        Ok(result) => {
            for m in &result.matches {
                if with_path {
                    println!("{}:{}", result.path.display(), m.line);
                } else {
                    println!("{}", m.line);
                }
            }
            result.matches.len()
        }
        Err(err) => {
            eprintln!("linegrep: {err}");
            0
        }
    }
}

fn exit_code(total_matches: usize) -> ExitCode {
    if total_matches > 0 {
        ExitCode::from(EXIT_MATCH)
    } else {
        ExitCode::from(EXIT_NO_MATCH)
    }
}
