//! Attach course records and human-readable explanations to surviving
//! candidates.

use pathwise_core::{Confidence, Course, Explanation, Recommendation, ScoredCandidate};
use std::collections::HashMap;

/// Fallback reason when a candidate somehow carries no signals.
const DEFAULT_REASON: &str = "Recommended for you";

/// Enrich candidates into final recommendations.
///
/// Candidates whose course is missing from the snapshot are dropped;
/// the primary reason is the first contributing source's reason and the
/// confidence is the combined score capped at 1.
pub fn enrich(
    candidates: Vec<ScoredCandidate>,
    courses_by_id: &HashMap<&str, &Course>,
) -> Vec<Recommendation> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let course = courses_by_id.get(candidate.course_id.as_str())?;
            let primary_reason = candidate
                .sources
                .first()
                .map(|s| s.reason.clone())
                .unwrap_or_else(|| DEFAULT_REASON.to_string());
            let sources = candidate.sources.iter().map(|s| s.kind).collect();

            Some(Recommendation {
                course_id: candidate.course_id,
                score: candidate.score,
                course: (*course).clone(),
                explanation: Explanation {
                    primary_reason,
                    sources,
                    confidence: Confidence::new(candidate.score),
                },
            })
        })
        .collect()
}
