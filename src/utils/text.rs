//! Case-insensitive string helpers shared by the search engine and the view model.

use std::cmp::Ordering;

/// Returns `true` if `needle` occurs in `haystack`, ignoring case.
/// An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Ordinal comparison of two strings after upper-casing every character.
///
/// Characters are folded one to one, so `ß` stays `ß` instead of becoming `SS`.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(simple_uppercase)
        .cmp(b.chars().map(simple_uppercase))
}

/// The uppercase form of `c` when it is a single character, otherwise `c` itself.
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
