//! Parses semicolon-separated wildcard lists and compiles them into one
//! case-insensitive file-name matcher.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;

/// The pattern used when a pattern string contains no usable token.
pub const CATCH_ALL_PATTERN: &str = "*";

const PATTERN_SEPARATOR: char = ';';

/// A pattern token that could not be used, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedPattern {
    pub pattern: String,
    pub reason: String,
}

/// Splits a pattern string such as `"*.png; *.jpg"` into trimmed, non-empty tokens.
///
/// Falls back to the catch-all pattern when nothing usable remains.
pub fn parse_patterns(pattern_string: &str) -> Vec<String> {
    let mut patterns: Vec<String> = pattern_string
        .split(PATTERN_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if patterns.is_empty() {
        patterns.push(CATCH_ALL_PATTERN.to_string());
    }
    patterns
}

/// Repairs a stored pattern string: blank input becomes the catch-all pattern.
pub fn normalize_pattern_string(pattern_string: &str) -> String {
    if pattern_string.trim().is_empty() {
        CATCH_ALL_PATTERN.to_string()
    } else {
        pattern_string.to_string()
    }
}

/// Matches bare file names against a union of glob patterns.
#[derive(Debug, Clone)]
pub struct FileNameMatcher {
    set: GlobSet,
    rejected: Vec<RejectedPattern>,
}

impl FileNameMatcher {
    pub fn is_match(&self, file_name: &OsStr) -> bool {
        self.set.is_match(Path::new(file_name))
    }

    /// The patterns that were skipped while building this matcher.
    pub fn rejected(&self) -> &[RejectedPattern] {
        &self.rejected
    }
}

/// Compiles `patterns` into a single matcher.
///
/// A pattern that fails to compile, or that contains a path separator, is
/// logged and skipped; the others still take part in the match.
pub fn build_file_name_matcher(patterns: &[String]) -> FileNameMatcher {
    let mut builder = GlobSetBuilder::new();
    let mut rejected = Vec::new();

    for pattern in patterns {
        if pattern.contains(['/', '\\']) {
            let reason = "patterns match file names and cannot contain path separators";
            tracing::warn!("Invalid search pattern '{}': {}", pattern, reason);
            rejected.push(RejectedPattern {
                pattern: pattern.clone(),
                reason: reason.to_string(),
            });
            continue;
        }

        match GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
        {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("Invalid search pattern '{}': {}", pattern, e);
                rejected.push(RejectedPattern {
                    pattern: pattern.clone(),
                    reason: e.kind().to_string(),
                });
            }
        }
    }

    let set = builder.build().unwrap_or_else(|e| {
        tracing::error!("Failed to build glob set from patterns: {}", e);
        GlobSet::empty()
    });

    FileNameMatcher { set, rejected }
}
