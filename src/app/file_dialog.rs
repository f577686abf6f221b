//! An abstraction layer for native file dialogs to enable testing.

use std::path::{Path, PathBuf};

/// Defines a common interface for folder selection dialogs.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a single directory, starting at `start_dir` if given.
    /// Returns `None` if the user cancels.
    fn pick_directory(&self, start_dir: Option<&Path>) -> Option<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let start = start_dir.map(Path::to_path_buf).or_else(dirs::home_dir);
        let mut dialog = rfd::FileDialog::new().set_title("Select Directory");
        if let Some(dir) = start {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder()
    }
}
