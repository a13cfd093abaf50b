// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization and Hangul word-boundary helpers.
//!
//! Every comparison in the search pipeline goes through [`normalize`], so two
//! strings are "equal" when they match after lowercasing and dropping all
//! whitespace. Character positions are counted in `char`s, never bytes.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const HANGUL_SYLLABLE_FIRST: char = '\u{AC00}';
const HANGUL_SYLLABLE_LAST: char = '\u{D7A3}';

/// Lowercase `s` and strip every whitespace run.
pub fn normalize(s: &str) -> String {
    WHITESPACE_RUN.replace_all(&s.to_lowercase(), "").into_owned()
}

/// Split on whitespace runs, dropping empty pieces.
pub fn whitespace_tokens(s: &str) -> Vec<&str> {
    WHITESPACE_RUN
        .split(s.trim())
        .filter(|token| !token.is_empty())
        .collect()
}

/// `true` iff `ch` lies in the precomposed Hangul syllable block.
#[inline]
pub fn is_hangul_syllable(ch: char) -> bool {
    (HANGUL_SYLLABLE_FIRST..=HANGUL_SYLLABLE_LAST).contains(&ch)
}

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Char index of the first occurrence of `needle` in `haystack` at or after
/// char index `from`.
pub(crate) fn find_chars(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&start| haystack[start..].starts_with(needle))
}

/// Char index of the first occurrence of `needle` in `haystack`.
pub fn char_index_of(haystack: &str, needle: &str) -> Option<usize> {
    let haystack: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    find_chars(&haystack, &needle, 0)
}

/// Count the Hangul syllables immediately following the first case-insensitive
/// occurrence of `needle` in `haystack`. Returns 0 when there is no match.
pub fn trailing_hangul_run(haystack: &str, needle: &str) -> usize {
    let haystack: Vec<char> = haystack.to_lowercase().chars().collect();
    let needle: Vec<char> = needle.to_lowercase().chars().collect();

    let Some(start) = find_chars(&haystack, &needle, 0) else {
        return 0;
    };

    haystack[start + needle.len()..]
        .iter()
        .take_while(|ch| is_hangul_syllable(**ch))
        .count()
}

/// `true` iff some case-insensitive occurrence of `needle` in `haystack` is
/// not glued to a Hangul syllable on either side.
///
/// All occurrences are checked: `"팥빙수와 팥"` matches `"팥"` at the second
/// occurrence even though the first one sits inside a longer word.
pub fn contains_at_hangul_boundary(haystack: &str, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return false;
    }
    let haystack: Vec<char> = haystack.to_lowercase().chars().collect();
    let needle: Vec<char> = needle.to_lowercase().chars().collect();

    let mut from = 0;
    while let Some(idx) = find_chars(&haystack, &needle, from) {
        let before_ok = idx == 0 || !is_hangul_syllable(haystack[idx - 1]);
        let after = idx + needle.len();
        let after_ok = after >= haystack.len() || !is_hangul_syllable(haystack[after]);
        if before_ok && after_ok {
            return true;
        }
        from = idx + 1;
    }
    false
}
