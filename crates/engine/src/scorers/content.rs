//! Content-based scoring: text and skill similarity between a profile
//! and course content.

use pathwise_core::{
    Course, Difficulty, DifficultyPreference, ScoredCandidate, SourceKind, UserProfile,
};
use std::collections::{HashMap, HashSet};

/// Weight of the term-frequency text similarity component.
const TEXT_WEIGHT: f64 = 0.4;
/// Weight of the skill-overlap component.
const SKILL_WEIGHT: f64 = 0.4;
/// Weight of the difficulty-match component.
const DIFFICULTY_WEIGHT: f64 = 0.2;

/// Score courses by similarity to the user's skills, interests, and
/// goals.
pub fn score(
    profile: &UserProfile,
    courses: &[Course],
    min_score: f64,
    max_candidates: usize,
) -> Vec<ScoredCandidate> {
    let blob = profile_blob(profile);
    let blob_terms = term_frequencies(&blob);
    let user_skills: Vec<String> = profile
        .skills
        .iter()
        .map(|s| s.name.clone())
        .collect();

    let mut candidates: Vec<ScoredCandidate> = courses
        .iter()
        .filter_map(|course| {
            let course_text = format!(
                "{} {} {}",
                course.title,
                course.description,
                course.skills.join(" ")
            );
            let text_sim = term_frequency_cosine(&blob_terms, &term_frequencies(&course_text));
            let skill_sim = skill_overlap(&user_skills, &course.skills);
            let difficulty = difficulty_match(profile.preferences.difficulty, course.difficulty);

            let combined =
                TEXT_WEIGHT * text_sim + SKILL_WEIGHT * skill_sim + DIFFICULTY_WEIGHT * difficulty;
            if combined < min_score {
                return None;
            }
            Some(ScoredCandidate::new(
                &course.id,
                combined,
                SourceKind::Content,
                "Matches your skills and interests",
            ))
        })
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(max_candidates);
    candidates
}

/// Concatenated profile text: skill names, interests, goal titles, and
/// goal required skills.
fn profile_blob(profile: &UserProfile) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for skill in &profile.skills {
        parts.push(&skill.name);
    }
    for interest in &profile.interests {
        parts.push(interest);
    }
    for goal in &profile.career_goals {
        parts.push(&goal.title);
        for required in &goal.required_skills {
            parts.push(required);
        }
    }
    parts.join(" ")
}

/// Token frequencies over lowercased alphanumeric words.
fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut frequencies = HashMap::new();
    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && !matches!(c, '+' | '#'))
        .filter(|t| !t.is_empty())
    {
        *frequencies.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    frequencies
}

/// Cosine similarity between raw term-frequency vectors over the union
/// vocabulary.
///
/// Deliberately NOT TF-IDF: there is no inverse-document-frequency term.
/// This reproduces the historical scoring and must not be silently
/// upgraded.
fn term_frequency_cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, fa)| b.get(term).map(|fb| fa * fb))
        .sum();
    let norm_a: f64 = a.values().map(|f| f * f).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|f| f * f).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Substring-aware Jaccard overlap between skill lists.
///
/// The intersection counts user skills that contain, or are contained
/// by, some course skill (case-insensitive); the union is the exact
/// lowercase string set of both lists.
fn skill_overlap(user_skills: &[String], course_skills: &[String]) -> f64 {
    if user_skills.is_empty() || course_skills.is_empty() {
        return 0.0;
    }

    let user_lower: Vec<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
    let course_lower: Vec<String> = course_skills.iter().map(|s| s.to_lowercase()).collect();

    let intersection = user_lower
        .iter()
        .filter(|u| {
            course_lower
                .iter()
                .any(|c| u.contains(c.as_str()) || c.contains(u.as_str()))
        })
        .count();
    let union: HashSet<&String> = user_lower.iter().chain(course_lower.iter()).collect();

    if union.is_empty() {
        0.0
    } else {
        intersection as f64 / union.len() as f64
    }
}

/// Difficulty preference match: 1 for a bucket hit, 0.5 for no stated
/// preference, 0 otherwise.
fn difficulty_match(preference: DifficultyPreference, difficulty: Difficulty) -> f64 {
    match preference {
        DifficultyPreference::Mixed => 0.5,
        DifficultyPreference::BeginnerFriendly => {
            if difficulty == Difficulty::Beginner {
                1.0
            } else {
                0.0
            }
        }
        DifficultyPreference::Challenging => {
            if matches!(difficulty, Difficulty::Advanced | Difficulty::Expert) {
                1.0
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_CANDIDATES, MIN_SIMILARITY_THRESHOLD};
    use pathwise_test_utils::{course_full, user_with_skills};

    fn run(profile: &UserProfile, courses: &[Course]) -> Vec<ScoredCandidate> {
        score(profile, courses, MIN_SIMILARITY_THRESHOLD, MAX_CANDIDATES)
    }

    #[test]
    fn matching_skills_score_a_course() {
        let profile = user_with_skills("alice", &["python", "machine learning"]);
        let courses = vec![course_full(
            "ml",
            "Machine Learning with Python",
            "Build models in python",
            &["machine learning", "python"],
            "data science",
            "provider-a",
            Difficulty::Intermediate,
        )];

        let candidates = run(&profile, &courses);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].course_id, "ml");
        assert!(candidates[0].score > 0.4);
    }

    #[test]
    fn unrelated_course_is_dropped() {
        let mut profile = user_with_skills("alice", &["python"]);
        profile.preferences.difficulty = DifficultyPreference::Challenging;
        let courses = vec![course_full(
            "knit",
            "Knitting Basics",
            "Yarn and needles",
            &["knitting"],
            "crafts",
            "provider-b",
            Difficulty::Beginner,
        )];

        assert!(run(&profile, &courses).is_empty());
    }

    #[test]
    fn mixed_preference_gives_half_difficulty_credit() {
        assert_eq!(
            difficulty_match(DifficultyPreference::Mixed, Difficulty::Expert),
            0.5
        );
        assert_eq!(
            difficulty_match(DifficultyPreference::BeginnerFriendly, Difficulty::Beginner),
            1.0
        );
        assert_eq!(
            difficulty_match(DifficultyPreference::BeginnerFriendly, Difficulty::Advanced),
            0.0
        );
        assert_eq!(
            difficulty_match(DifficultyPreference::Challenging, Difficulty::Expert),
            1.0
        );
    }

    #[test]
    fn skill_overlap_is_substring_aware() {
        let user = vec!["python".to_string()];
        let course = vec!["python programming".to_string()];
        assert!(skill_overlap(&user, &course) > 0.0);

        let identical = vec!["python".to_string(), "sql".to_string()];
        assert_eq!(skill_overlap(&identical, &identical.clone()), 1.0);

        let disjoint = vec!["knitting".to_string()];
        assert_eq!(skill_overlap(&user, &disjoint), 0.0);
    }

    #[test]
    fn goal_required_skills_feed_the_blob() {
        let mut profile = user_with_skills("alice", &["python"]);
        profile
            .career_goals
            .push(pathwise_test_utils::goal("ML Engineer", &["machine learning"]));

        let courses = vec![course_full(
            "ml",
            "Machine Learning Fundamentals",
            "An introduction to machine learning",
            &["machine learning"],
            "data science",
            "provider-a",
            Difficulty::Intermediate,
        )];

        let candidates = run(&profile, &courses);
        assert_eq!(candidates.len(), 1, "goal text should pull the course in");
    }

    #[test]
    fn term_frequency_cosine_is_plain_tf() {
        // Identical single-token texts score 1 regardless of how common
        // the token would be corpus-wide; no IDF discounting.
        let a = term_frequencies("python python");
        let b = term_frequencies("python");
        assert!((term_frequency_cosine(&a, &b) - 1.0).abs() < 1e-9);
    }
}
