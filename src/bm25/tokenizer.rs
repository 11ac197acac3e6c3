//! Whitespace tokenizer with Hangul support and stop word removal.
//!
//! Tokenizes text by lowercasing, splitting on any character outside the
//! word set (ASCII alphanumerics, underscore, Hangul jamo and syllables),
//! and removing common Korean and English stop words. Single-character
//! tokens are also discarded. Uses a zero-per-token allocation design via
//! byte spans.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Korean demonstratives, dependent nouns, connectives
        "이", "그", "저", "것", "등", "및",
        // English articles and copulas
        "the", "a", "an", "is", "are",
    ]
    .into_iter()
    .collect()
});

/// Word characters kept by the tokenizer: ASCII alphanumerics, underscore,
/// Hangul compatibility jamo (ㄱ-ㅎ, ㅏ-ㅣ), and Hangul syllables (가-힣).
/// Everything else acts as a separator.
fn is_word_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | 'ㄱ'..='ㅎ' | 'ㅏ'..='ㅣ' | '가'..='힣')
}

/// Tokenized text: owns the lowercased buffer, provides &str slices via byte spans.
/// Only 1 heap allocation (the lowercased String) instead of N per-token Strings.
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>, // (start, end) byte offsets into buffer
}

impl Tokens {
    /// Returns an iterator over the token `&str` slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Tokenize text: lowercase, split on non-word characters, remove stop words.
/// Token length is counted in characters, so a lone Hangul syllable is
/// dropped just like a lone ASCII letter. Returns a Tokens struct that owns
/// the lowercased buffer. Zero per-token allocation.
pub fn tokenize(text: &str) -> Tokens {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in buffer.char_indices() {
        if is_word_char(c) {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            let token = &buffer[s..i];
            if token.chars().count() > 1 && !STOP_WORDS.contains(token) {
                spans.push((s as u32, i as u32));
            }
            start = None;
        }
    }
    // Handle last token (no trailing separator)
    if let Some(s) = start {
        let token = &buffer[s..];
        if token.chars().count() > 1 && !STOP_WORDS.contains(token) {
            spans.push((s as u32, buffer.len() as u32));
        }
    }

    Tokens { buffer, spans }
}
