//! Recursive, multi-pattern file search with a case-insensitive name filter.

use super::pattern::{build_file_name_matcher, RejectedPattern};
use super::{CoreError, FileRecord, PathValidator, SearchQuery};
use crate::utils::text::{compare_ignore_case, contains_ignore_case};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The outcome of a search: the matching files plus any patterns that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub files: Vec<FileRecord>,
    pub rejected_patterns: Vec<RejectedPattern>,
}

/// A utility struct for searching a directory tree.
///
/// This struct is stateless and provides methods as associated functions.
/// Every search runs synchronously on the calling thread.
pub struct FileSearchEngine;

impl FileSearchEngine {
    /// Searches `root` recursively and returns the sorted, deduplicated matches.
    ///
    /// Never fails: an invalid root is logged as a warning and any other
    /// failure as an error, and both yield an empty list.
    pub fn search(
        root: impl Into<PathBuf>,
        name_filter: &str,
        pattern_string: &str,
    ) -> Vec<FileRecord> {
        Self::search_with_report(&SearchQuery::new(root, name_filter, pattern_string)).files
    }

    /// Like [`FileSearchEngine::search`], but also reports rejected patterns.
    pub fn search_with_report(query: &SearchQuery) -> SearchReport {
        match Self::try_search(query) {
            Ok(report) => report,
            Err(CoreError::InvalidDirectory(path)) => {
                tracing::warn!("Invalid directory path: {}", path.display());
                SearchReport::default()
            }
            Err(e) => {
                tracing::error!("Failed to list files: {}", e);
                SearchReport::default()
            }
        }
    }

    /// The fallible search used by callers that want to surface failures themselves.
    ///
    /// Only problems with the root itself are returned as errors. Unreadable
    /// entries further down are logged and skipped.
    pub fn try_search(query: &SearchQuery) -> Result<SearchReport, CoreError> {
        if !PathValidator::is_valid_directory(&query.root) {
            return Err(CoreError::InvalidDirectory(query.root.clone()));
        }

        let root = std::path::absolute(&query.root)
            .map_err(|e| CoreError::Io(e, query.root.clone()))?;

        // Fail the whole search if the root cannot be listed (e.g. permission denied).
        std::fs::read_dir(&root).map_err(|e| CoreError::Io(e, root.clone()))?;

        let matcher = build_file_name_matcher(&query.patterns);

        let mut matched: HashSet<PathBuf> = HashSet::new();
        for entry in WalkDir::new(&root).follow_links(false).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            if matcher.is_match(entry.file_name()) {
                matched.insert(entry.into_path());
            }
        }

        // Files may disappear between enumeration and inspection.
        let name_filter = &query.name_filter;
        let mut files: Vec<FileRecord> = matched
            .into_iter()
            .filter(|path| PathValidator::is_valid_file(path))
            .filter_map(|path| FileRecord::from_path(&path))
            .filter(|record| contains_ignore_case(&record.name, name_filter))
            .collect();

        files.sort_by(|a, b| {
            compare_ignore_case(&a.name, &b.name).then_with(|| a.path.cmp(&b.path))
        });

        tracing::debug!(
            "Search in {} with {:?} found {} files",
            root.display(),
            query.patterns,
            files.len()
        );

        Ok(SearchReport {
            files,
            rejected_patterns: matcher.rejected().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::running_as_root;
    use proptest::prelude::*;
    use std::cmp::Ordering;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};
    use tracing_test::traced_test;

    fn project(files: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, file.as_bytes()).unwrap();
        }
        dir
    }

    fn names(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_single_pattern_sorted_case_insensitively() {
        let dir = project(&["a.txt", "B.TXT", "note.md"]);
        let result = FileSearchEngine::search(dir.path(), "", "*.txt");
        assert_eq!(names(&result), vec!["a.txt", "B.TXT"]);
    }

    #[test]
    fn test_multiple_patterns_with_filter() {
        let dir = project(&["photo.png", "photo.jpg", "doc.pdf"]);
        let result = FileSearchEngine::search(dir.path(), "photo", "*.png;*.jpg");
        assert_eq!(names(&result), vec!["photo.jpg", "photo.png"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let dir = project(&["Photo.PNG", "holiday.png"]);
        let result = FileSearchEngine::search(dir.path(), "PHOTO", "*.png");
        assert_eq!(names(&result), vec!["Photo.PNG"]);
    }

    #[test]
    fn test_overlapping_patterns_yield_one_record() {
        let dir = project(&["report.txt", "other.md"]);
        let result = FileSearchEngine::search(dir.path(), "", "*.txt;report.*;*");
        let reports: Vec<_> = result.iter().filter(|r| r.name == "report.txt").collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_empty_pattern_string_behaves_like_catch_all() {
        let dir = project(&["a.txt", "sub/b.md", "sub/deeper/c.rs"]);
        let all = FileSearchEngine::search(dir.path(), "", "*");
        assert_eq!(all.len(), 3);
        assert_eq!(FileSearchEngine::search(dir.path(), "", ""), all);
        assert_eq!(FileSearchEngine::search(dir.path(), "", " ; ;"), all);
    }

    #[test]
    fn test_recurses_and_skips_directories() {
        let dir = project(&["top.txt", "src/nested/deep.txt"]);
        fs::create_dir_all(dir.path().join("folder.txt")).unwrap();

        let result = FileSearchEngine::search(dir.path(), "", "*.txt");
        assert_eq!(names(&result), vec!["deep.txt", "top.txt"]);
        assert!(result.iter().all(|r| r.exists && r.path.is_absolute()));
    }

    #[test]
    fn test_records_carry_size() {
        let dir = project(&[]);
        fs::write(dir.path().join("five.bin"), b"12345").unwrap();
        let result = FileSearchEngine::search(dir.path(), "", "*.bin");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].size, 5);
        assert_eq!(result[0].path, dir.path().join("five.bin"));
    }

    #[test]
    fn test_equal_names_are_ordered_by_path() {
        let dir = project(&["b/same.txt", "a/same.txt"]);
        let result = FileSearchEngine::search(dir.path(), "", "*.txt");
        assert_eq!(result.len(), 2);
        assert!(result[0].path.ends_with(Path::new("a/same.txt")));
        assert!(result[1].path.ends_with(Path::new("b/same.txt")));
    }

    #[test]
    fn test_invalid_pattern_is_reported_and_search_continues() {
        let dir = project(&["keep.md", "skip.txt"]);
        let query = SearchQuery::new(dir.path(), "", "[abc;*.md");
        let report = FileSearchEngine::try_search(&query).unwrap();

        assert_eq!(names(&report.files), vec!["keep.md"]);
        assert_eq!(report.rejected_patterns.len(), 1);
        assert_eq!(report.rejected_patterns[0].pattern, "[abc");
    }

    #[test]
    fn test_all_patterns_invalid_yields_nothing() {
        let dir = project(&["a.txt"]);
        let query = SearchQuery::new(dir.path(), "", "[x;sub/*.txt");
        let report = FileSearchEngine::try_search(&query).unwrap();
        assert!(report.files.is_empty());
        assert_eq!(report.rejected_patterns.len(), 2);
    }

    #[test]
    #[traced_test]
    fn test_missing_root_returns_empty_and_warns() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = FileSearchEngine::search(&missing, "", "*");

        assert!(result.is_empty());
        assert!(logs_contain("Invalid directory path"));
    }

    #[test]
    fn test_file_as_root_is_invalid() {
        let dir = project(&["a.txt"]);
        let query = SearchQuery::new(dir.path().join("a.txt"), "", "*");
        assert!(matches!(
            FileSearchEngine::try_search(&query),
            Err(CoreError::InvalidDirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    #[traced_test]
    fn test_unreadable_root_returns_empty_and_logs_error() {
        use std::os::unix::fs::PermissionsExt;

        if running_as_root() {
            return;
        }

        let dir = project(&["secret.txt"]);
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("inner.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let query = SearchQuery::new(&locked, "", "*");
        let outcome = FileSearchEngine::try_search(&query);
        let swallowed = FileSearchEngine::search(&locked, "", "*");

        // Nested unreadable directories only cost their own entries.
        let partial = FileSearchEngine::search(dir.path(), "", "*");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(outcome, Err(CoreError::Io(..))));
        assert!(swallowed.is_empty());
        assert!(logs_contain("Failed to list files"));
        assert_eq!(names(&partial), vec!["secret.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_descended() {
        let dir = project(&["real/inside.txt"]);
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        let result = FileSearchEngine::search(dir.path(), "", "*.txt");
        assert_eq!(result.len(), 1);
        assert!(result[0].path.ends_with(Path::new("real/inside.txt")));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_results_sorted_filtered_and_unique(
            files in prop::collection::hash_set("[a-z]{1,6}\\.(txt|md)", 0..10),
            filter in "[a-z]{0,2}",
        ) {
            let dir = tempdir().unwrap();
            for file in &files {
                fs::write(dir.path().join(file), "").unwrap();
            }

            let result = FileSearchEngine::search(dir.path(), &filter, "*.txt;*.t?t");

            for pair in result.windows(2) {
                let (first, second) = (&pair[0].name, &pair[1].name);
                prop_assert_ne!(compare_ignore_case(first, second), Ordering::Greater);
            }
            for record in &result {
                prop_assert!(record.name.ends_with(".txt"));
                prop_assert!(record.name.contains(filter.as_str()));
            }
            let unique: HashSet<_> = result.iter().map(|r| r.path.clone()).collect();
            prop_assert_eq!(unique.len(), result.len());

            let expected = files
                .iter()
                .filter(|f| f.ends_with(".txt") && f.contains(filter.as_str()))
                .count();
            prop_assert_eq!(result.len(), expected);
        }
    }
}
