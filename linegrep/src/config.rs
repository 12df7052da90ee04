//! Search configuration.
//!
//! Configuration can come from an optional YAML file (`.linegrep.yaml` in
//! the current directory, or an explicit path) with CLI arguments merged on
//! top by the caller. Example:
//!
//! ```yaml
//! # Recurse into directories
//! recursive: true
//!
//! # Thread count for multi-file searches (default: CPU cores)
//! thread_count: 4
//!
//! # Log level (trace, debug, info, warn, error)
//! log_level: "info"
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};

use crate::errors::{SearchError, SearchResult};

/// Configuration for one search invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The pattern to match against each line.
    #[serde(default)]
    pub pattern: String,

    /// Files and directories to search.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Whether directories are walked recursively.
    #[serde(default)]
    pub recursive: bool,

    /// Number of threads for the per-file fan-out.
    /// Defaults to the number of CPU cores.
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get().max(1)).expect("cpu count is nonzero")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            paths: Vec::new(),
            recursive: false,
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default location (`.linegrep.yaml` in
    /// the current directory, if present).
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file, or the default location
    /// when `config_path` is `None`. A missing default file yields the
    /// built-in defaults; a missing explicit file is an error.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let builder = match config_path {
            Some(path) => ConfigBuilder::builder().add_source(File::from(path.to_path_buf())),
            None => ConfigBuilder::builder().add_source(File::with_name(".linegrep").required(false)),
        };
        let loaded = builder
            .build()
            .map_err(|e| SearchError::config(e.to_string()))?;
        loaded
            .try_deserialize()
            .map_err(|e| SearchError::config(e.to_string()))
    }
}
