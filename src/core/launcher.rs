//! Opens files with the operating system's default application.

use super::{CoreError, PathValidator};
use std::path::Path;

/// Hands a file over to whatever the platform considers its default handler.
/// Abstracted so tests can record launches instead of spawning processes.
pub trait FileLauncher: Send + Sync {
    fn launch(&self, path: &Path) -> std::io::Result<()>;
}

/// The production launcher, backed by the `open` crate
/// (`ShellExecute` on Windows, `open` on macOS, `xdg-open` and friends elsewhere).
pub struct SystemLauncher;

impl FileLauncher for SystemLauncher {
    fn launch(&self, path: &Path) -> std::io::Result<()> {
        open::that_detached(path)
    }
}

/// Opens `path` after checking that it still exists as a file.
pub fn open_file<L: FileLauncher + ?Sized>(launcher: &L, path: &Path) -> Result<(), CoreError> {
    if !PathValidator::is_valid_file(path) {
        return Err(CoreError::FileNotFound(path.to_path_buf()));
    }

    launcher
        .launch(path)
        .map_err(|e| CoreError::Launch(e, path.to_path_buf()))?;

    tracing::info!("Opened file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl FileLauncher for RecordingLauncher {
        fn launch(&self, path: &Path) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no handler"));
            }
            self.launched.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_open_existing_file_launches_it() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("readme.md");
        std::fs::write(&file, "# hi").unwrap();
        let launcher = RecordingLauncher::default();

        open_file(&launcher, &file).unwrap();

        assert_eq!(*launcher.launched.lock().unwrap(), vec![file]);
    }

    #[test]
    fn test_open_missing_file_is_rejected_without_launching() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher::default();

        let result = open_file(&launcher, &dir.path().join("gone.txt"));

        assert!(matches!(result, Err(CoreError::FileNotFound(_))));
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn test_open_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        assert!(matches!(
            open_file(&launcher, dir.path()),
            Err(CoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_launch_failure_is_wrapped() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();
        let launcher = RecordingLauncher {
            fail: true,
            ..Default::default()
        };

        let err = open_file(&launcher, &file).unwrap_err();

        assert!(matches!(err, CoreError::Launch(..)));
        assert!(err.to_string().contains("no handler"));
    }
}
