//! The per-user preference store and the browser settings kept in it.
//!
//! The store is a flat string-to-string map. It is injected into the
//! application state rather than reached through a global, so every consumer
//! can be tested against [`MemoryPreferenceStore`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::settings::get_config_directory;
use crate::core::pattern::{normalize_pattern_string, CATCH_ALL_PATTERN};
use crate::core::{CoreError, PathValidator};

const PREFERENCES_FILE: &str = "preferences.json";

pub const DIRECTORY_KEY: &str = "file_browser.directory";
pub const SEARCH_TERM_KEY: &str = "file_browser.search_term";
pub const SEARCH_PATTERN_KEY: &str = "file_browser.search_pattern";

/// Keyed string storage that survives between sessions once flushed.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str, default: &str) -> String;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
    fn flush(&mut self) -> io::Result<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
    flushes: usize,
}

impl MemoryPreferenceStore {
    /// How many times `flush` has been called.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// A store backed by a JSON object on disk. Writes only reach the file on `flush`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Opens the store in the platform configuration directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = get_config_directory()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::open(dir.join(PREFERENCES_FILE)))
    }

    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// or corrupt one is logged and replaced on the next flush.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to parse preferences at {:?}: {}. Starting with empty preferences.",
                    path,
                    e
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

/// The browser state that is restored at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSettings {
    pub root_directory: String,
    pub name_filter: String,
    pub pattern_string: String,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            root_directory: String::new(),
            name_filter: String::new(),
            pattern_string: CATCH_ALL_PATTERN.to_string(),
        }
    }
}

impl PersistedSettings {
    /// Reads all settings, repairing a blank pattern string to the catch-all pattern.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        Self {
            root_directory: store.get(DIRECTORY_KEY, ""),
            name_filter: store.get(SEARCH_TERM_KEY, ""),
            pattern_string: normalize_pattern_string(
                &store.get(SEARCH_PATTERN_KEY, CATCH_ALL_PATTERN),
            ),
        }
    }
}

/// Persists `path` as the browsed directory. Invalid directories are refused
/// and nothing is written.
pub fn save_directory_path<S: PreferenceStore + ?Sized>(
    store: &mut S,
    path: &str,
) -> Result<(), CoreError> {
    if !PathValidator::is_valid_directory(path) {
        return Err(CoreError::InvalidDirectory(PathBuf::from(path)));
    }
    store.set(DIRECTORY_KEY, path);
    store.flush().map_err(CoreError::Preferences)
}

pub fn clear_directory_path<S: PreferenceStore + ?Sized>(store: &mut S) -> io::Result<()> {
    store.delete(DIRECTORY_KEY);
    store.flush()
}

pub fn save_search_term<S: PreferenceStore + ?Sized>(store: &mut S, term: &str) -> io::Result<()> {
    store.set(SEARCH_TERM_KEY, term);
    store.flush()
}

/// Persists the pattern string and returns the value actually stored,
/// which is the catch-all pattern when `pattern_string` is blank.
pub fn save_search_pattern<S: PreferenceStore + ?Sized>(
    store: &mut S,
    pattern_string: &str,
) -> io::Result<String> {
    let normalized = normalize_pattern_string(pattern_string);
    store.set(SEARCH_PATTERN_KEY, &normalized);
    store.flush()?;
    Ok(normalized)
}

pub fn clear_search_settings<S: PreferenceStore + ?Sized>(store: &mut S) -> io::Result<()> {
    store.delete(SEARCH_TERM_KEY);
    store.delete(SEARCH_PATTERN_KEY);
    store.flush()
}
