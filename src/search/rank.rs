// gm-locator/src/search/rank.rs
use super::fuzzy::FuzzyQuery;
use crate::location::LocationEntry;
use anyhow::{ensure, Result};
use std::cmp::Ordering;

pub const MAX_RESULTS: usize = 5;

const DISPLAY_NAME_WEIGHT: f64 = 0.8;
const EXACT_NAME_BONUS: f64 = 100.0;
const TAG_HIT_SCORE: f64 = 40.0;
const TAG_HIT_THRESHOLD: f64 = 60.0;

/// A location paired with its score for the current pass.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub location: &'a LocationEntry,
    pub score: f64,
    name_prefix: bool,
    word_prefix: bool,
}

impl<'a> ScoredCandidate<'a> {
    fn new(location: &'a LocationEntry, query: &FuzzyQuery) -> Self {
        let q = query.as_str();
        Self {
            location,
            score: score_location(location, query),
            name_prefix: location.name.to_lowercase().starts_with(q),
            word_prefix: location.name_words_start_with(q),
        }
    }
}

/// Composite score: best of name, display name and tags, plus bonuses, scaled by importance.
pub fn score_location(location: &LocationEntry, query: &FuzzyQuery) -> f64 {
    let name_score = query.score(&location.name);
    let display_score = query.score(&location.display_name) * DISPLAY_NAME_WEIGHT;

    let exact_bonus = if location.name.to_lowercase() == query.as_str() {
        EXACT_NAME_BONUS
    } else {
        0.0
    };

    let tag_score = if location
        .tags
        .iter()
        .any(|tag| query.score(tag) > TAG_HIT_THRESHOLD)
    {
        TAG_HIT_SCORE
    } else {
        0.0
    };

    let best = name_score.max(display_score).max(tag_score);
    (best + exact_bonus + location.type_bonus()) * (0.5 + location.importance / 2.0)
}

/// Minimum score for the fallback pass, when no name matched directly.
fn score_threshold(query_len: usize) -> f64 {
    match query_len {
        0..=2 => 80.0,
        3..=4 => 60.0,
        _ => 40.0,
    }
}

/// Ranks `locations` against an already validated, trimmed query.
///
/// Direct name hits win outright: any word of the name starting with the
/// query, or (for 3+ chars, when there are none) the name containing it.
/// Only when neither exists does the score threshold decide. At most
/// [`MAX_RESULTS`] entries come back, best first.
pub fn rank(query: &str, locations: &[LocationEntry]) -> Result<Vec<LocationEntry>> {
    let query = FuzzyQuery::new(query);
    let q = query.as_str();
    let is_short = query.char_len() <= 2;

    let mut scored = Vec::with_capacity(locations.len());
    for location in locations {
        ensure!(
            location.importance.is_finite(),
            "location '{}' has non-finite importance {}",
            location.id,
            location.importance
        );
        let candidate = ScoredCandidate::new(location, &query);
        ensure!(
            candidate.score.is_finite(),
            "location '{}' produced non-finite score",
            location.id
        );
        scored.push(candidate);
    }

    let name_starts: Vec<ScoredCandidate> =
        scored.iter().filter(|c| c.word_prefix).cloned().collect();

    // Short queries never fall back to plain substring hits.
    let direct = if is_short || !name_starts.is_empty() {
        name_starts
    } else {
        scored
            .iter()
            .filter(|c| c.location.name.to_lowercase().contains(q))
            .cloned()
            .collect()
    };

    let mut pool = if direct.is_empty() {
        let threshold = score_threshold(query.char_len());
        scored.into_iter().filter(|c| c.score > threshold).collect()
    } else {
        direct
    };

    pool.sort_by(|a, b| compare(a, b, is_short));

    Ok(pool
        .into_iter()
        .take(MAX_RESULTS)
        .map(|c| c.location.clone())
        .collect())
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate, is_short: bool) -> Ordering {
    let prefix_order = if is_short {
        (b.name_prefix, b.word_prefix).cmp(&(a.name_prefix, a.word_prefix))
    } else {
        Ordering::Equal
    };

    prefix_order
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| b.location.importance.total_cmp(&a.location.importance))
}
