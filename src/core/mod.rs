pub mod error;
pub mod launcher;
pub mod pattern;
pub mod search;
pub mod validator;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A snapshot of one file found by a search. It is only guaranteed to be
/// accurate at the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub exists: bool,
}

impl FileRecord {
    /// Reads the metadata behind `path`. Returns `None` if it can no longer be inspected.
    pub fn from_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            exists: metadata.is_file(),
        })
    }
}

/// The inputs of a single search. Built fresh for every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub root: PathBuf,
    pub patterns: Vec<String>,
    pub name_filter: String,
}

impl SearchQuery {
    pub fn new(root: impl Into<PathBuf>, name_filter: &str, pattern_string: &str) -> Self {
        Self {
            root: root.into(),
            patterns: pattern::parse_patterns(pattern_string),
            name_filter: name_filter.to_string(),
        }
    }
}

pub use error::CoreError;
pub use launcher::{FileLauncher, SystemLauncher};
pub use pattern::RejectedPattern;
pub use search::{FileSearchEngine, SearchReport};
pub use validator::PathValidator;
