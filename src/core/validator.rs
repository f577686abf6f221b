//! Fail-closed checks for user-supplied directory and file paths.
//!
//! Every check returns `false` instead of an error. Malformed input simply
//! degrades to "no match" for the caller.

use std::path::{Path, PathBuf};

#[cfg(windows)]
const RESERVED_PATH_CHARS: &[char] = &['"', '<', '>', '|'];
#[cfg(not(windows))]
const RESERVED_PATH_CHARS: &[char] = &[];

#[cfg(windows)]
const RESERVED_FILE_NAME_CHARS: &[char] = &['"', '<', '>', '|', ':', '*', '?', '\\', '/'];
#[cfg(not(windows))]
const RESERVED_FILE_NAME_CHARS: &[char] = &['/'];

/// NUL is reserved everywhere; Windows also rejects ASCII control characters.
fn is_reserved(c: char, extra: &[char]) -> bool {
    c == '\0' || (cfg!(windows) && (c as u32) < 0x20) || extra.contains(&c)
}

fn contains_reserved(text: &str, extra: &[char]) -> bool {
    text.chars().any(|c| is_reserved(c, extra))
}

/// A stateless validator for directory and file paths.
pub struct PathValidator;

impl PathValidator {
    /// Returns `true` if `path` resolves to an existing, accessible directory.
    pub fn is_valid_directory(path: impl AsRef<Path>) -> bool {
        Self::resolve(path.as_ref(), RESERVED_PATH_CHARS).is_some_and(|full| full.is_dir())
    }

    /// Returns `true` if `path` resolves to an existing file (not a directory).
    ///
    /// Reserved characters are checked against the file-name component only.
    /// Symbolic links are followed.
    pub fn is_valid_file(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(file_name) = path.file_name() else {
            return false;
        };
        if contains_reserved(&file_name.to_string_lossy(), RESERVED_FILE_NAME_CHARS) {
            return false;
        }
        Self::resolve(path, &[]).is_some_and(|full| full.is_file())
    }

    fn resolve(path: &Path, reserved: &[char]) -> Option<PathBuf> {
        let raw = path.as_os_str();
        if raw.is_empty() || contains_reserved(&raw.to_string_lossy(), reserved) {
            return None;
        }
        std::path::absolute(path).ok()
    }
}
