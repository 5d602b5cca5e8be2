//! Character-set Jaccard similarity for fuzzy catalog matching.
//!
//! Linguistic and section matching compare candidate terms against the
//! catalog with this metric. It is deliberately coarse (sets of
//! characters, not n-grams): "pythn" vs "python" shares {p,y,t,h,n} of
//! {p,y,t,h,o,n} and scores 5/6.

use std::collections::HashSet;

/// Acceptance threshold for a catalog match.
pub const MATCH_THRESHOLD: f64 = 0.7;

/// Jaccard similarity over the character sets of two strings.
///
/// Case-insensitive; returns a value in [0.0, 1.0]. Empty input on
/// either side yields 0.0.
pub fn jaccard_chars(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<char> = a.to_lowercase().chars().collect();
    let set_b: HashSet<char> = b.to_lowercase().chars().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

/// Best catalog match for a term: the known skill with the highest
/// character-set similarity, if any clears `threshold`.
pub fn best_catalog_match<'a>(
    term: &str,
    skills: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> Option<(&'a str, f64)> {
    skills
        .into_iter()
        .map(|skill| (skill, jaccard_chars(term, skill)))
        .filter(|(_, sim)| *sim > threshold)
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
