//! Collaborative filtering: nearest-neighbor scoring over the
//! interaction matrix.

use crate::matrix::{cosine_similarity, InteractionMatrix};
use pathwise_core::{Course, ScoredCandidate, SourceKind, UserProfile};

/// Score courses for `user_id` from what similar users interacted with.
///
/// Returns an empty list when fewer than 2 users or 2 courses exist, or
/// when the requesting user is absent from the snapshot
/// (insufficient data, not an error).
pub fn score(
    user_id: &str,
    users: &[UserProfile],
    courses: &[Course],
    min_similarity: f64,
    max_neighbors: usize,
) -> Vec<ScoredCandidate> {
    if users.len() < 2 || courses.len() < 2 {
        return Vec::new();
    }

    let matrix = InteractionMatrix::build(users, courses);
    let Some(me) = matrix.user_row(user_id) else {
        return Vec::new();
    };
    let my_row = matrix.row(me);

    // Nearest neighbors: every other user's row, keep the closest ones
    // above the similarity floor.
    let mut neighbors: Vec<(usize, f64)> = (0..matrix.user_count())
        .filter(|row| *row != me)
        .map(|row| (row, cosine_similarity(my_row, matrix.row(row))))
        .filter(|(_, similarity)| *similarity > min_similarity)
        .collect();
    neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    neighbors.truncate(max_neighbors);

    if neighbors.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for col in 0..matrix.course_count() {
        // Only courses the requester has not interacted with.
        if my_row[col] != 0.0 {
            continue;
        }

        let mut weighted = 0.0;
        let mut similarity_sum = 0.0;
        for (row, similarity) in &neighbors {
            weighted += similarity * matrix.weight(*row, col);
            similarity_sum += similarity;
        }
        let predicted = weighted / similarity_sum;

        if predicted > min_similarity {
            candidates.push(ScoredCandidate::new(
                matrix.course_id(col),
                predicted,
                SourceKind::Collaborative,
                "Learners with a similar history engaged with this course",
            ));
        }
    }

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}
