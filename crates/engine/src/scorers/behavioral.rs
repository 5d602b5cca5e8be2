//! Behavioral scoring: preferences derived from completed history.

use pathwise_core::{
    Course, Difficulty, HistoryStatus, ScoredCandidate, SignalSource, SourceKind, UserProfile,
};
use std::collections::HashMap;

/// Score accrued for a category preference hit.
const CATEGORY_SCORE: f64 = 0.4;
/// Score accrued for a provider preference hit.
const PROVIDER_SCORE: f64 = 0.3;
/// Score accrued for a difficulty preference hit.
const DIFFICULTY_SCORE: f64 = 0.3;

/// Categories kept from the completion history.
const TOP_CATEGORIES: usize = 3;
/// Providers kept from the completion history.
const TOP_PROVIDERS: usize = 2;

/// Preferences observed in a user's completed courses.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedPreferences {
    /// Up to three most-completed categories.
    pub categories: Vec<String>,
    /// Up to two most-completed providers.
    pub providers: Vec<String>,
    /// Single most frequent difficulty; intermediate without history.
    pub difficulty: Difficulty,
}

/// Derive preferences from completed history entries.
///
/// Frequency ties break by first-seen order, so the result is
/// deterministic for a fixed snapshot.
pub fn observed_preferences(profile: &UserProfile, courses: &[Course]) -> ObservedPreferences {
    let by_id: HashMap<&str, &Course> = courses.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut categories: Vec<(String, usize)> = Vec::new();
    let mut providers: Vec<(String, usize)> = Vec::new();
    let mut difficulties: Vec<(Difficulty, usize)> = Vec::new();

    for entry in &profile.learning_history {
        if entry.status != HistoryStatus::Completed {
            continue;
        }
        let Some(course) = by_id.get(entry.course_id.as_str()) else {
            continue;
        };
        bump(&mut categories, course.category.clone());
        bump(&mut providers, course.provider.clone());
        bump(&mut difficulties, course.difficulty);
    }

    sort_by_count(&mut categories);
    sort_by_count(&mut providers);
    sort_by_count(&mut difficulties);

    ObservedPreferences {
        categories: categories
            .into_iter()
            .take(TOP_CATEGORIES)
            .map(|(c, _)| c)
            .collect(),
        providers: providers
            .into_iter()
            .take(TOP_PROVIDERS)
            .map(|(p, _)| p)
            .collect(),
        difficulty: difficulties
            .first()
            .map(|(d, _)| *d)
            .unwrap_or(Difficulty::Intermediate),
    }
}

/// Score courses against the user's observed preferences.
pub fn score(
    profile: &UserProfile,
    courses: &[Course],
    max_candidates: usize,
) -> Vec<ScoredCandidate> {
    let preferences = observed_preferences(profile, courses);

    let mut candidates: Vec<ScoredCandidate> = courses
        .iter()
        .filter_map(|course| {
            let mut total = 0.0;
            let mut reasons = Vec::new();

            if preferences.categories.contains(&course.category) {
                total += CATEGORY_SCORE;
                reasons.push(format!("You often complete {} courses", course.category));
            }
            if preferences.providers.contains(&course.provider) {
                total += PROVIDER_SCORE;
                reasons.push(format!("You like courses from {}", course.provider));
            }
            if preferences.difficulty == course.difficulty {
                total += DIFFICULTY_SCORE;
                reasons.push(format!(
                    "Matches your usual {} difficulty",
                    course.difficulty.label()
                ));
            }

            if total <= 0.0 {
                return None;
            }
            Some(ScoredCandidate {
                course_id: course.id.clone(),
                score: total,
                sources: vec![SignalSource {
                    kind: SourceKind::Behavioral,
                    score: total,
                    reason: reasons.join("; "),
                }],
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    candidates.truncate(max_candidates);
    candidates
}

/// Increment a first-seen-ordered counter list.
fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}

/// Stable sort by descending count; first-seen order breaks ties.
fn sort_by_count<K>(counts: &mut [(K, usize)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CANDIDATES;
    use pathwise_test_utils::{course_full, history_entry, user_with_history};

    fn catalog() -> Vec<Course> {
        vec![
            course_full("d1", "Data 1", "", &[], "data science", "provider-a", Difficulty::Intermediate),
            course_full("d2", "Data 2", "", &[], "data science", "provider-a", Difficulty::Intermediate),
            course_full("w1", "Web 1", "", &[], "web development", "provider-b", Difficulty::Beginner),
            course_full("d3", "Data 3", "", &[], "data science", "provider-a", Difficulty::Intermediate),
            course_full("c1", "Crafts", "", &[], "crafts", "provider-c", Difficulty::Expert),
        ]
    }

    fn completed(course_id: &str) -> pathwise_core::LearningHistoryEntry {
        history_entry(course_id, HistoryStatus::Completed, 100.0, Some(4))
    }

    #[test]
    fn preferences_come_from_completions_only() {
        let profile = user_with_history(
            "alice",
            vec![
                completed("d1"),
                completed("d2"),
                history_entry("w1", HistoryStatus::Dropped, 5.0, None),
            ],
        );
        let preferences = observed_preferences(&profile, &catalog());

        assert_eq!(preferences.categories, vec!["data science"]);
        assert_eq!(preferences.providers, vec!["provider-a"]);
        assert_eq!(preferences.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn no_history_defaults_to_intermediate() {
        let profile = user_with_history("alice", vec![]);
        let preferences = observed_preferences(&profile, &catalog());
        assert!(preferences.categories.is_empty());
        assert!(preferences.providers.is_empty());
        assert_eq!(preferences.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let profile = user_with_history("alice", vec![completed("w1"), completed("d1")]);
        let preferences = observed_preferences(&profile, &catalog());
        // One completion each; web development was seen first.
        assert_eq!(preferences.categories[0], "web development");
        assert_eq!(preferences.difficulty, Difficulty::Beginner);
    }

    #[test]
    fn matching_courses_accrue_component_scores() {
        let profile = user_with_history("alice", vec![completed("d1"), completed("d2")]);
        let candidates = score(&profile, &catalog(), MAX_CANDIDATES);

        // d3 matches category + provider + difficulty.
        let d3 = candidates.iter().find(|c| c.course_id == "d3").unwrap();
        assert!((d3.score - 1.0).abs() < 1e-9);

        // The crafts course matches nothing and is absent.
        assert!(!candidates.iter().any(|c| c.course_id == "c1"));
    }

    #[test]
    fn zero_scored_candidates_are_dropped() {
        let profile = user_with_history("alice", vec![]);
        // No completions: only the default-intermediate difficulty can hit.
        let candidates = score(&profile, &catalog(), MAX_CANDIDATES);
        assert!(candidates
            .iter()
            .all(|c| (c.score - DIFFICULTY_SCORE).abs() < 1e-9));
        assert!(!candidates.iter().any(|c| c.course_id == "w1"));
    }
}
