//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Boundary functions in the `core` and `app` layers convert these into log
/// lines and user notifications. None of them is fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The path is empty, contains reserved characters, or is not an existing directory.
    #[error("Invalid directory path: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {}: {}", .1.display(), .0)]
    Io(#[source] std::io::Error, PathBuf),

    /// The file vanished (or never existed) by the time it was needed.
    #[error("File does not exist or was deleted: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The platform's default-application handler could not be started.
    #[error("Failed to open file {}: {}", .1.display(), .0)]
    Launch(#[source] std::io::Error, PathBuf),

    /// The preference store could not be written back to disk.
    #[error("Failed to save preferences: {0}")]
    Preferences(#[source] std::io::Error),
}
