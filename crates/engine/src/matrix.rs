//! Sparse-conceptually, dense-physically user × course interaction
//! matrix.
//!
//! A derived, rebuildable snapshot artifact: weights are a pure function
//! of each user's learning history, so the matrix can be rebuilt from
//! any snapshot without extra state.

use pathwise_core::{Course, HistoryStatus, LearningHistoryEntry, UserProfile};
use std::collections::HashMap;

/// Upper bound of an interaction weight.
pub const MAX_WEIGHT: f64 = 2.0;

/// Dense user × course interaction weights, row-major.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    user_index: HashMap<String, usize>,
    course_ids: Vec<String>,
    course_index: HashMap<String, usize>,
    weights: Vec<f64>,
}

impl InteractionMatrix {
    /// Build the matrix from a snapshot of users and courses.
    ///
    /// O(users × courses); history entries for unknown courses are
    /// ignored.
    pub fn build(users: &[UserProfile], courses: &[Course]) -> Self {
        let user_index: HashMap<String, usize> = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id.clone(), i))
            .collect();
        let course_ids: Vec<String> = courses.iter().map(|c| c.id.clone()).collect();
        let course_index: HashMap<String, usize> = course_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let mut weights = vec![0.0; users.len() * courses.len()];
        for (row, user) in users.iter().enumerate() {
            for entry in &user.learning_history {
                if let Some(col) = course_index.get(&entry.course_id) {
                    weights[row * course_ids.len() + col] = interaction_weight(entry);
                }
            }
        }

        Self {
            user_index,
            course_ids,
            course_index,
            weights,
        }
    }

    /// Number of user rows.
    pub fn user_count(&self) -> usize {
        self.user_index.len()
    }

    /// Number of course columns.
    pub fn course_count(&self) -> usize {
        self.course_ids.len()
    }

    /// Row index for a user id.
    pub fn user_row(&self, user_id: &str) -> Option<usize> {
        self.user_index.get(user_id).copied()
    }

    /// Course id at a column index.
    pub fn course_id(&self, col: usize) -> &str {
        &self.course_ids[col]
    }

    /// Column index for a course id.
    pub fn course_col(&self, course_id: &str) -> Option<usize> {
        self.course_index.get(course_id).copied()
    }

    /// A user's full weight row.
    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.course_ids.len();
        &self.weights[row * cols..(row + 1) * cols]
    }

    /// Single interaction weight.
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.course_ids.len() + col]
    }
}

/// Deterministic interaction weight for one history entry, in
/// [0, `MAX_WEIGHT`].
///
/// Status carries most of the signal; progress and an optional rating
/// refine it. No entry means 0.
pub fn interaction_weight(entry: &LearningHistoryEntry) -> f64 {
    let status_base = match entry.status {
        HistoryStatus::Completed => 1.0,
        HistoryStatus::InProgress => 0.7,
        HistoryStatus::Enrolled => 0.4,
        HistoryStatus::Paused => 0.3,
        HistoryStatus::Dropped => 0.1,
    };
    let progress_bonus = (entry.progress.clamp(0.0, 100.0) / 100.0) * 0.5;
    let rating_bonus = entry
        .rating
        .map(|r| (f64::from(r.min(5)) / 5.0) * 0.5)
        .unwrap_or(0.0);

    (status_base + progress_bonus + rating_bonus).clamp(0.0, MAX_WEIGHT)
}

/// Cosine similarity between two weight rows.
///
/// A zero-norm vector is defined to have similarity 0 against anything;
/// there is no division by zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
