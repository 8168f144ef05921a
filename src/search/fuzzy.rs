// gm-locator/src/search/fuzzy.rs
use super::distance::levenshtein_distance;
use regex::Regex;
use tracing::warn;

pub const EXACT: f64 = 100.0;
pub const WHOLE_WORD: f64 = 90.0;
pub const PREFIX: f64 = 85.0;
pub const WORD_PREFIX: f64 = 80.0;
pub const WORD_INFIX: f64 = 75.0;
pub const WORD_BOUNDARY: f64 = 70.0;
pub const SUBSTRING: f64 = 60.0;

/// Short queries (1-2 chars) only score on prefixes; a bare substring hit is weak.
const SHORT_QUERY_MAX_LEN: usize = 2;
const SHORT_PREFIX: f64 = 90.0;
const SHORT_WORD_PREFIX: f64 = 85.0;
const SHORT_SUBSTRING: f64 = 40.0;

/// Ceiling of the edit-distance fallback.
const FUZZY_CEILING: f64 = 50.0;

/// A lower-cased query with its whole-word regex built once, so a ranking
/// pass can score every candidate without recompiling.
#[derive(Debug, Clone)]
pub struct FuzzyQuery {
    query: String,
    char_len: usize,
    whole_word: Option<Regex>,
}

impl FuzzyQuery {
    pub fn new(query: &str) -> Self {
        let query = query.to_lowercase();
        let whole_word = if query.is_empty() {
            None
        } else {
            // Literal match: metacharacters in the query are escaped.
            match Regex::new(&format!(r"\b{}\b", regex::escape(&query))) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(query = %query, error = %e, "whole-word matcher unavailable; skipping word-boundary rules");
                    None
                }
            }
        };

        Self {
            char_len: query.chars().count(),
            query,
            whole_word,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Scores `text` on a 0..=100 scale. First rule that applies wins.
    pub fn score(&self, text: &str) -> f64 {
        if self.query.is_empty() {
            return 0.0;
        }
        let text = text.to_lowercase();
        if text.is_empty() {
            return 0.0;
        }
        let q = self.query.as_str();

        if text == q {
            return EXACT;
        }
        if self.is_whole_word_in(&text) {
            return WHOLE_WORD;
        }
        if text.starts_with(q) {
            return PREFIX;
        }
        if any_word(&text, |word| word.starts_with(q)) {
            return WORD_PREFIX;
        }
        if any_word(&text, |word| word.contains(q)) {
            return WORD_INFIX;
        }
        // Same test as WHOLE_WORD, so never reached. Kept so scores stay stable.
        if self.is_whole_word_in(&text) {
            return WORD_BOUNDARY;
        }
        if text.contains(q) {
            return SUBSTRING;
        }

        if self.char_len <= SHORT_QUERY_MAX_LEN {
            if text.starts_with(q) {
                return SHORT_PREFIX;
            }
            if any_word(&text, |word| word.starts_with(q)) {
                return SHORT_WORD_PREFIX;
            }
            return if text.contains(q) { SHORT_SUBSTRING } else { 0.0 };
        }

        let max_len = text.chars().count().max(self.char_len) as f64;
        let distance = levenshtein_distance(&text, q) as f64;
        (FUZZY_CEILING - (distance * 10.0) / max_len).max(0.0)
    }

    fn is_whole_word_in(&self, text: &str) -> bool {
        self.whole_word.as_ref().is_some_and(|re| re.is_match(text))
    }
}

fn any_word(text: &str, pred: impl Fn(&str) -> bool) -> bool {
    text.split_whitespace().any(pred)
}

/// How well `query` matches `text`, case-insensitively. Empty input on either side scores 0.
pub fn fuzzy_match(text: &str, query: &str) -> f64 {
    FuzzyQuery::new(query).score(text)
}
