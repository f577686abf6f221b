//! Defines the central, mutable state of the application.

use crate::config::preferences::{PersistedSettings, PreferenceStore};
use crate::config::AppConfig;
use crate::core::{
    CoreError, FileRecord, FileSearchEngine, PathValidator, RejectedPattern, SearchQuery,
};

/// Holds the complete, mutable state of the file browser.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so the IPC loop and the
/// command handlers can share it. It changes only in response to commands;
/// every change is followed by a freshly generated `UiState`.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Where the directory, search term and pattern string are persisted.
    pub preferences: Box<dyn PreferenceStore>,
    /// The directory being browsed, as the user entered or picked it. Empty if none.
    pub current_directory: String,
    /// The case-insensitive substring filter for file names.
    pub search_term: String,
    /// The semicolon-separated wildcard patterns.
    pub search_pattern: String,
    /// The result of the last search.
    pub files: Vec<FileRecord>,
    /// Pattern tokens the last search had to skip.
    pub rejected_patterns: Vec<RejectedPattern>,
    /// A failure from the first search, held until a front end is there to see it.
    pub startup_error: Option<String>,
}

impl AppState {
    /// Restores the persisted settings from `preferences` and runs the first search.
    pub fn new(config: AppConfig, preferences: Box<dyn PreferenceStore>) -> Self {
        let settings = PersistedSettings::load(&*preferences);
        let mut state = Self {
            config,
            preferences,
            current_directory: settings.root_directory,
            search_term: settings.name_filter,
            search_pattern: settings.pattern_string,
            files: Vec::new(),
            rejected_patterns: Vec::new(),
            startup_error: None,
        };
        if let Err(e) = state.refresh_files() {
            state.startup_error = Some(format!("Failed to list files: {}", e));
        }
        state
    }

    pub fn has_directory(&self) -> bool {
        !self.current_directory.is_empty()
    }

    pub fn directory_exists(&self) -> bool {
        PathValidator::is_valid_directory(&self.current_directory)
    }

    /// Re-runs the search for the current directory, pattern and search term.
    ///
    /// With no usable directory the list is simply emptied. A failed search
    /// also empties the list and hands the error back so the caller can tell the user.
    pub fn refresh_files(&mut self) -> Result<(), CoreError> {
        if !self.has_directory() || !self.directory_exists() {
            self.clear_results();
            return Ok(());
        }

        let query = SearchQuery::new(
            &self.current_directory,
            &self.search_term,
            &self.search_pattern,
        );
        match FileSearchEngine::try_search(&query) {
            Ok(report) => {
                self.files = report.files;
                self.rejected_patterns = report.rejected_patterns;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to list files: {}", e);
                self.clear_results();
                Err(e)
            }
        }
    }

    /// Forgets the browsed directory and its results. Search settings are kept.
    pub fn reset_directory_state(&mut self) {
        self.current_directory.clear();
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.files.clear();
        self.rejected_patterns.clear();
    }
}
