//! Word and character limited truncation
//!
//! Both algorithms count Unicode scalar values, never bytes, and only ever
//! strip a *trailing* run of punctuation (`\p{P}`) before appending the
//! ellipsis. Interior punctuation is left alone.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

/// Ellipsis appended when no other is given
pub const DEFAULT_ELLIPSIS: &str = "...";

static TRAILING_PUNCTUATION: OnceLock<Regex> = OnceLock::new();

fn trailing_punctuation_regex() -> &'static Regex {
    TRAILING_PUNCTUATION.get_or_init(|| {
        Regex::new(r"\p{P}+$").expect("trailing punctuation pattern is valid")
    })
}

/// Remove a trailing run of Unicode punctuation
pub fn strip_trailing_punctuation(text: &str) -> &str {
    match trailing_punctuation_regex().find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Keep at most `max` whitespace-separated words.
///
/// Words are rejoined with single spaces. When words were dropped, trailing
/// punctuation is stripped from the kept text and `ellipsis` is appended;
/// otherwise the rejoined text is returned as is.
pub fn max_words(text: &str, max: usize, ellipsis: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= max {
        return words.join(" ");
    }

    let kept = words[..max].join(" ");
    format!("{}{}", strip_trailing_punctuation(&kept), ellipsis)
}

/// Keep at most `max` characters, preferring to cut at a word boundary.
///
/// Whitespace runs are collapsed first. If the result still exceeds `max`
/// characters, the longest prefix of at most `max` characters that is
/// followed by whitespace is kept, stripped of trailing punctuation, and
/// given the ellipsis. When no such prefix exists (a single long word, or
/// `max == 0`) the text is hard-cut at `max` characters and the ellipsis is
/// appended without stripping.
pub fn max_chars(text: &str, max: usize, ellipsis: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = collapsed.chars().collect();

    if chars.len() <= max {
        return collapsed;
    }

    // chars.len() > max, so chars[cut] is always in bounds
    let boundary = (1..=max).rev().find(|&cut| chars[cut].is_whitespace());

    match boundary {
        Some(cut) => {
            let prefix: String = chars[..cut].iter().collect();
            format!("{}{}", strip_trailing_punctuation(&prefix), ellipsis)
        }
        None => {
            let prefix: String = chars[..max].iter().collect();
            format!("{}{}", prefix, ellipsis)
        }
    }
}
