//! Text normalization shared by scoring and answer matching.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercases and trims, the baseline for every case-insensitive comparison.
#[must_use]
pub fn fold_case(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Case-insensitive equality after trimming both sides.
#[must_use]
pub fn eq_loose(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// Decomposes to NFD and drops combining marks, so `"café"` becomes `"cafe"`.
#[must_use]
pub fn strip_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapses every run of whitespace into a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(input: &str) -> usize {
    input.split_whitespace().count()
}
