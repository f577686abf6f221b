//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as a presentation layer. It decides which panel view is
//! shown, shortens the directory path for display, and formats file sizes.
//! It is called once after every command that changes state.

use crate::config::PatternPreset;
use crate::core::RejectedPattern;
use serde::Serialize;
use std::path::PathBuf;

use super::state::AppState;

/// Which of the three panel layouts the front end should draw.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelView {
    /// No directory has been chosen yet.
    NoDirectory,
    /// The saved directory no longer exists; offer to reselect or clear it.
    InvalidDirectory,
    /// Search controls and the file list.
    Browsing,
}

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub view: PanelView,
    pub current_directory: String,
    pub display_path: String,
    pub search_term: String,
    pub search_pattern: String,
    pub presets: Vec<PatternPreset>,
    pub files: Vec<FileRow>,
    pub rejected_patterns: Vec<RejectedPattern>,
    pub status_message: String,
}

/// One line of the file list.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FileRow {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub size_label: String,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let view = if !state.has_directory() {
        PanelView::NoDirectory
    } else if !state.directory_exists() {
        PanelView::InvalidDirectory
    } else {
        PanelView::Browsing
    };

    let files: Vec<FileRow> = if view == PanelView::Browsing {
        state
            .files
            .iter()
            .map(|record| FileRow {
                name: record.name.clone(),
                path: record.path.clone(),
                size: record.size,
                size_label: format_file_size(record.size),
            })
            .collect()
    } else {
        Vec::new()
    };

    let status_message = match view {
        PanelView::NoDirectory => "No directory selected.".to_string(),
        PanelView::InvalidDirectory => "Directory is invalid or no longer exists.".to_string(),
        PanelView::Browsing if files.is_empty() => "No matching files found.".to_string(),
        PanelView::Browsing if files.len() == 1 => "1 file".to_string(),
        PanelView::Browsing => format!("{} files", files.len()),
    };

    UiState {
        view,
        current_directory: state.current_directory.clone(),
        display_path: truncate_display_path(
            &state.current_directory,
            state.config.display_path_max_chars,
        ),
        search_term: state.search_term.clone(),
        search_pattern: state.search_pattern.clone(),
        presets: state.config.pattern_presets.clone(),
        files,
        rejected_patterns: state.rejected_patterns.clone(),
        status_message,
    }
}

/// Shortens `path` to at most `max_chars` characters by keeping its tail behind `...`.
pub fn truncate_display_path(path: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";

    let len = path.chars().count();
    if len <= max_chars {
        return path.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let tail: String = path.chars().skip(len - keep).collect();
    format!("{ELLIPSIS}{tail}")
}

/// Formats a byte count as `B`, `KB`, `MB` or `GB` with one decimal above bytes.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::preferences::MemoryPreferenceStore;
    use crate::config::AppConfig;
    use std::fs;
    use tempfile::tempdir;

    fn empty_state() -> AppState {
        AppState::new(
            AppConfig::default(),
            Box::new(MemoryPreferenceStore::default()),
        )
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_truncate_display_path() {
        assert_eq!(truncate_display_path("/short/path", 50), "/short/path");

        let long = format!("/{}", "a".repeat(60));
        let shown = truncate_display_path(&long, 50);
        assert_eq!(shown.chars().count(), 50);
        assert!(shown.starts_with("..."));
        assert!(long.ends_with(&shown[3..]));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let path = "/projekte/übersicht/größen";
        assert_eq!(truncate_display_path(path, 10), ".../größen");
    }

    #[test]
    fn test_view_without_directory() {
        let ui = generate_ui_state(&empty_state());
        assert_eq!(ui.view, PanelView::NoDirectory);
        assert!(ui.files.is_empty());
        assert_eq!(ui.presets.len(), 3);
    }

    #[test]
    fn test_view_with_missing_directory() {
        let dir = tempdir().unwrap();
        let mut state = empty_state();
        state.current_directory = dir.path().join("gone").to_string_lossy().to_string();

        let ui = generate_ui_state(&state);
        assert_eq!(ui.view, PanelView::InvalidDirectory);
        assert_eq!(
            ui.status_message,
            "Directory is invalid or no longer exists."
        );
    }

    #[test]
    fn test_view_while_browsing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big.bin"), vec![0u8; 2048]).unwrap();
        let mut state = empty_state();
        state.current_directory = dir.path().to_string_lossy().to_string();
        state.refresh_files().unwrap();

        let ui = generate_ui_state(&state);
        assert_eq!(ui.view, PanelView::Browsing);
        assert_eq!(ui.files.len(), 1);
        assert_eq!(ui.files[0].size_label, "2.0 KB");
        assert_eq!(ui.status_message, "1 file");
    }

    #[test]
    fn test_empty_listing_message() {
        let dir = tempdir().unwrap();
        let mut state = empty_state();
        state.current_directory = dir.path().to_string_lossy().to_string();
        state.refresh_files().unwrap();

        let ui = generate_ui_state(&state);
        assert_eq!(ui.status_message, "No matching files found.");
    }
}
