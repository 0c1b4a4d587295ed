//! Text heuristics for turning page text into slide material.
//!
//! Plain string processing only: whitespace collapsing, punctuation-based
//! sentence splitting, blank-line paragraph splitting and a title picker.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse any run of whitespace (including newlines) into one space.
static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching one or more blank-line paragraph breaks.
static PARAGRAPH_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Number of words used for the fallback title.
const TITLE_FALLBACK_WORDS: usize = 5;

/// Exclusive bounds on the length of a first-sentence title.
const MIN_TITLE_CHARS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;

/// Latin presentation-form ligatures (`ﬀ` through `ﬆ`).
const LIGATURES: std::ops::RangeInclusive<char> = '\u{FB00}'..='\u{FB06}';

/// Expand ligature glyphs into plain letters.
///
/// Only the ligature block is touched. Other compatibility characters such
/// as `…` or fullwidth `！` are left alone so they never become sentence
/// terminators.
pub fn fold_ligatures(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        if LIGATURES.contains(&c) {
            output.extend(std::iter::once(c).nfkc());
        } else {
            output.push(c);
        }
    }
    output
}

/// Collapse every whitespace run to a single space and trim.
///
/// Ligature glyphs such as `ﬁ` come out as plain letters.
pub fn collapse_whitespace(text: &str) -> String {
    let normalized = fold_ligatures(text);
    WHITESPACE_RUN_REGEX
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// Join text items with a single space and collapse the result.
pub fn join_text_items<S: AsRef<str>>(items: &[S]) -> String {
    let joined = items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}

/// Collapse whitespace within each line while keeping the line structure.
///
/// Line endings are normalized to `\n` and blank lines are kept, so the
/// output can still be split into paragraphs.
pub fn collapse_layout(text: &str) -> String {
    let normalized = fold_ligatures(text).replace("\r\n", "\n").replace('\r', "\n");

    normalized
        .split('\n')
        .map(|line| WHITESPACE_RUN_REGEX.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split text into sentences on `.`, `!` and `?`.
///
/// Each sentence is trimmed and gets a trailing period; empty pieces are dropped.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s))
        .collect()
}

/// Split text into paragraphs on blank lines.
pub fn split_into_paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    PARAGRAPH_BREAK_REGEX
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick a title for a page.
///
/// Uses the first sentence when it is a plausible heading length, then the
/// first few words with an ellipsis, and finally `Page N`.
pub fn generate_page_title(text: &str, page_number: usize) -> String {
    if text.is_empty() {
        return format!("Page {}", page_number);
    }

    let first_sentence = text
        .split(SENTENCE_TERMINATORS)
        .next()
        .unwrap_or_default()
        .trim();
    let length = first_sentence.chars().count();

    if length > MIN_TITLE_CHARS && length < MAX_TITLE_CHARS {
        return first_sentence.to_string();
    }

    let first_words = text
        .split(' ')
        .take(TITLE_FALLBACK_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    if first_words.is_empty() {
        format!("Page {}", page_number)
    } else {
        format!("{}...", first_words)
    }
}

/// Derive a deck title from the source filename.
///
/// Only the first `.pdf` occurrence is removed.
pub fn deck_title_from_filename(filename: &str) -> String {
    let title = filename.replacen(".pdf", "", 1);
    let title = title.trim();

    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title.to_string()
    }
}
