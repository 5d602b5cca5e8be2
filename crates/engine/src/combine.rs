//! Combination pipeline: weighted merge, diversity filter, completed
//! filter.

use pathwise_core::{Course, ScoredCandidate, SourceKind, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pairwise course-similarity component for a shared category.
const SAME_CATEGORY_SIM: f64 = 0.4;
/// Pairwise course-similarity scale for skill overlap.
const SKILL_OVERLAP_SIM: f64 = 0.4;
/// Pairwise course-similarity component for a shared difficulty.
const SAME_DIFFICULTY_SIM: f64 = 0.2;

/// Fixed per-source combination weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeights {
    pub collaborative: f64,
    pub content: f64,
    pub market: f64,
    pub behavioral: f64,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.35,
            content: 0.35,
            market: 0.20,
            behavioral: 0.10,
        }
    }
}

impl SourceWeights {
    /// Weight for one source kind.
    pub fn weight_for(&self, kind: SourceKind) -> f64 {
        match kind {
            SourceKind::Collaborative => self.collaborative,
            SourceKind::Content => self.content,
            SourceKind::Market => self.market,
            SourceKind::Behavioral => self.behavioral,
        }
    }

    /// Check the invariant that the weights sum to 1.0.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sum = self.collaborative + self.content + self.market + self.behavioral;
        if (sum - 1.0).abs() > 1e-9 {
            anyhow::bail!("source weights must sum to 1.0, got {sum}");
        }
        Ok(())
    }
}

/// One scorer's output, tagged with its kind and weight.
#[derive(Debug, Clone)]
pub struct WeightedSource {
    /// Which scorer produced these candidates.
    pub kind: SourceKind,
    /// Combination weight applied to every candidate score.
    pub weight: f64,
    /// The scorer's candidates.
    pub candidates: Vec<ScoredCandidate>,
}

/// Merge per-source candidates into one weighted list.
///
/// Groups by course id; the combined score is the weighted sum of the
/// per-source scores, and the source lists concatenate in source order
/// for explainability.
pub fn merge(sources: Vec<WeightedSource>) -> Vec<ScoredCandidate> {
    let mut merged: Vec<ScoredCandidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for source in sources {
        for candidate in source.candidates {
            let weighted = candidate.score * source.weight;
            match index.get(&candidate.course_id) {
                Some(&i) => {
                    merged[i].score += weighted;
                    merged[i].sources.extend(candidate.sources);
                }
                None => {
                    index.insert(candidate.course_id.clone(), merged.len());
                    merged.push(ScoredCandidate {
                        course_id: candidate.course_id,
                        score: weighted,
                        sources: candidate.sources,
                    });
                }
            }
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    merged
}

/// Suppress near-duplicate candidates relative to already-accepted ones.
///
/// The top-scored candidate is always kept. Each subsequent candidate is
/// accepted only if its pairwise similarity to every accepted course
/// stays strictly below `1 − diversity_factor`; at factor 0 this still
/// rejects exact duplicates (similarity 1.0).
pub fn diversity_filter(
    candidates: Vec<ScoredCandidate>,
    diversity_factor: f64,
    courses_by_id: &HashMap<&str, &Course>,
) -> Vec<ScoredCandidate> {
    let ceiling = (1.0 - diversity_factor).clamp(0.0, 1.0);
    let mut accepted: Vec<ScoredCandidate> = Vec::new();

    for candidate in candidates {
        if accepted.is_empty() {
            accepted.push(candidate);
            continue;
        }
        let Some(course) = courses_by_id.get(candidate.course_id.as_str()) else {
            continue;
        };

        let too_similar = accepted.iter().any(|kept| {
            courses_by_id
                .get(kept.course_id.as_str())
                .map(|kept_course| course_similarity(course, kept_course) >= ceiling)
                .unwrap_or(false)
        });
        if !too_similar {
            accepted.push(candidate);
        }
    }

    accepted
}

/// Drop candidates for courses the user already completed.
pub fn completed_filter(
    candidates: Vec<ScoredCandidate>,
    profile: &UserProfile,
) -> Vec<ScoredCandidate> {
    let completed: Vec<&str> = profile.completed_course_ids();
    candidates
        .into_iter()
        .filter(|c| !completed.contains(&c.course_id.as_str()))
        .collect()
}

/// Pairwise course similarity: shared category, skill overlap, shared
/// difficulty.
pub fn course_similarity(a: &Course, b: &Course) -> f64 {
    let category = if a.category.eq_ignore_ascii_case(&b.category) {
        SAME_CATEGORY_SIM
    } else {
        0.0
    };
    let difficulty = if a.difficulty == b.difficulty {
        SAME_DIFFICULTY_SIM
    } else {
        0.0
    };

    category + SKILL_OVERLAP_SIM * skill_jaccard(&a.skills, &b.skills) + difficulty
}

/// Plain case-insensitive Jaccard over two skill lists.
fn skill_jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let set_a: std::collections::HashSet<String> = a.iter().map(|s| s.to_lowercase()).collect();
    let set_b: std::collections::HashSet<String> = b.iter().map(|s| s.to_lowercase()).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::{Difficulty, HistoryStatus};
    use pathwise_test_utils::{course_full, history_entry, user_with_history};

    fn sources_for(scores: &[(&str, f64, SourceKind)]) -> Vec<WeightedSource> {
        let weights = SourceWeights::default();
        let mut by_kind: HashMap<SourceKind, Vec<ScoredCandidate>> = HashMap::new();
        for (course_id, score, kind) in scores {
            by_kind
                .entry(*kind)
                .or_default()
                .push(ScoredCandidate::new(course_id, *score, *kind, "test"));
        }
        by_kind
            .into_iter()
            .map(|(kind, candidates)| WeightedSource {
                kind,
                weight: weights.weight_for(kind),
                candidates,
            })
            .collect()
    }

    #[test]
    fn default_weights_sum_to_one() {
        SourceWeights::default().validate().unwrap();
    }

    #[test]
    fn merge_sums_weighted_scores_per_course() {
        let merged = merge(sources_for(&[
            ("c1", 1.0, SourceKind::Collaborative),
            ("c1", 1.0, SourceKind::Content),
            ("c2", 1.0, SourceKind::Market),
        ]));

        let c1 = merged.iter().find(|c| c.course_id == "c1").unwrap();
        assert!((c1.score - 0.70).abs() < 1e-9);
        assert_eq!(c1.sources.len(), 2);

        let c2 = merged.iter().find(|c| c.course_id == "c2").unwrap();
        assert!((c2.score - 0.20).abs() < 1e-9);
    }

    #[test]
    fn merged_scores_stay_within_weight_sum() {
        // All per-source scores at the 1.0 ceiling: combined score is
        // exactly the weight sum.
        let merged = merge(sources_for(&[
            ("c1", 1.0, SourceKind::Collaborative),
            ("c1", 1.0, SourceKind::Content),
            ("c1", 1.0, SourceKind::Market),
            ("c1", 1.0, SourceKind::Behavioral),
        ]));
        assert!((merged[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn merge_orders_by_descending_score() {
        let merged = merge(sources_for(&[
            ("low", 0.2, SourceKind::Content),
            ("high", 0.9, SourceKind::Content),
        ]));
        assert_eq!(merged[0].course_id, "high");
    }

    fn clone_course(id: &str) -> Course {
        course_full(
            id,
            "Clone",
            "",
            &["python"],
            "data science",
            "provider-a",
            Difficulty::Intermediate,
        )
    }

    #[test]
    fn diversity_always_keeps_the_top_candidate() {
        let a = clone_course("a");
        let b = clone_course("b");
        let courses: HashMap<&str, &Course> = [("a", &a), ("b", &b)].into();
        let candidates = vec![
            ScoredCandidate::new("a", 0.9, SourceKind::Content, "r"),
            ScoredCandidate::new("b", 0.8, SourceKind::Content, "r"),
        ];

        let kept = diversity_filter(candidates, 1.0, &courses);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].course_id, "a");
    }

    #[test]
    fn identical_candidates_are_rejected_even_at_factor_zero() {
        let a = clone_course("a");
        let b = clone_course("b");
        let c = clone_course("c");
        let courses: HashMap<&str, &Course> = [("a", &a), ("b", &b), ("c", &c)].into();
        let candidates = vec![
            ScoredCandidate::new("a", 0.9, SourceKind::Content, "r"),
            ScoredCandidate::new("b", 0.8, SourceKind::Content, "r"),
            ScoredCandidate::new("c", 0.7, SourceKind::Content, "r"),
        ];

        let kept = diversity_filter(candidates, 0.0, &courses);
        assert_eq!(kept.len(), 1, "pairwise-identical courses must collapse");
    }

    #[test]
    fn dissimilar_candidates_pass_the_default_factor() {
        let a = clone_course("a");
        let b = course_full(
            "b",
            "Different",
            "",
            &["knitting"],
            "crafts",
            "provider-b",
            Difficulty::Expert,
        );
        let courses: HashMap<&str, &Course> = [("a", &a), ("b", &b)].into();
        let candidates = vec![
            ScoredCandidate::new("a", 0.9, SourceKind::Content, "r"),
            ScoredCandidate::new("b", 0.8, SourceKind::Content, "r"),
        ];

        let kept = diversity_filter(candidates, 0.3, &courses);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn completed_filter_drops_exactly_completed_ids() {
        let profile = user_with_history(
            "alice",
            vec![
                history_entry("done", HistoryStatus::Completed, 100.0, None),
                history_entry("ongoing", HistoryStatus::InProgress, 50.0, None),
                history_entry("dropped", HistoryStatus::Dropped, 5.0, None),
            ],
        );
        let candidates = vec![
            ScoredCandidate::new("done", 0.9, SourceKind::Content, "r"),
            ScoredCandidate::new("ongoing", 0.8, SourceKind::Content, "r"),
            ScoredCandidate::new("dropped", 0.7, SourceKind::Content, "r"),
            ScoredCandidate::new("fresh", 0.6, SourceKind::Content, "r"),
        ];

        let kept = completed_filter(candidates, &profile);
        let ids: Vec<&str> = kept.iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["ongoing", "dropped", "fresh"]);
    }

    #[test]
    fn course_similarity_components() {
        let a = clone_course("a");
        let b = clone_course("b");
        assert!((course_similarity(&a, &b) - 1.0).abs() < 1e-9);

        let unrelated = course_full(
            "u",
            "Unrelated",
            "",
            &["knitting"],
            "crafts",
            "provider-b",
            Difficulty::Expert,
        );
        assert_eq!(course_similarity(&a, &unrelated), 0.0);
    }
}
