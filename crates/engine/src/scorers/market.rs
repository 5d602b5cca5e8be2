//! Market-driven scoring: trending skills and career-goal gaps.

use crate::stores::{DemandLevel, MarketTrends};
use chrono::{DateTime, Utc};
use pathwise_core::{Course, ScoredCandidate, SignalSource, SkillLevel, SourceKind, UserProfile};
use std::collections::HashMap;

/// Fixed score for a course that closes a career-goal skill gap.
const GOAL_SCORE: f64 = 0.8;
/// Bonus when the user already holds a skill related to the trend.
const RELATED_SKILL_BONUS: f64 = 0.2;

/// Score courses against trending skills and the user's career goals.
///
/// Trends the user already holds at advanced or expert level are
/// skipped; goal-driven candidates come from each active goal's unmet
/// required skills.
pub fn score(
    profile: &UserProfile,
    trends: &MarketTrends,
    courses: &[Course],
    now: DateTime<Utc>,
    max_candidates: usize,
) -> Vec<ScoredCandidate> {
    // course id -> best candidate; a course reachable through several
    // trends or goals keeps its highest-scored signal.
    let mut best: HashMap<String, ScoredCandidate> = HashMap::new();
    let mut keep_best = |candidate: ScoredCandidate| {
        best.entry(candidate.course_id.clone())
            .and_modify(|existing| {
                if candidate.score > existing.score {
                    *existing = candidate.clone();
                }
            })
            .or_insert(candidate);
    };

    for trend in &trends.trending_skills {
        if profile.holds_skill_at(&trend.skill, SkillLevel::Advanced) {
            continue;
        }

        let demand_bonus = match trend.demand {
            DemandLevel::High => 0.3,
            DemandLevel::Medium => 0.1,
            DemandLevel::Low => 0.0,
        };
        let related_bonus = if has_related_skill(profile, &trend.skill) {
            RELATED_SKILL_BONUS
        } else {
            0.0
        };
        let trend_score = (trend.growth_rate / 100.0 + demand_bonus + related_bonus).min(1.0);

        for course in courses_teaching(courses, &trend.skill) {
            keep_best(ScoredCandidate::new(
                &course.id,
                trend_score,
                SourceKind::Market,
                &format!(
                    "{} is trending ({:.0}% growth, {} demand)",
                    trend.skill,
                    trend.growth_rate,
                    trend.demand.label()
                ),
            ));
        }
    }

    for goal in profile.career_goals.iter().filter(|g| g.is_active(now)) {
        for required in &goal.required_skills {
            if profile.holds_skill_at(required, SkillLevel::Beginner) {
                continue;
            }
            for course in courses_teaching(courses, required) {
                keep_best(ScoredCandidate {
                    course_id: course.id.clone(),
                    score: GOAL_SCORE,
                    sources: vec![SignalSource {
                        kind: SourceKind::Market,
                        score: GOAL_SCORE,
                        reason: format!("Required for your goal: {}", goal.title),
                    }],
                });
            }
        }
    }

    let mut candidates: Vec<ScoredCandidate> = best.into_values().collect();
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    candidates.truncate(max_candidates);
    candidates
}

/// Courses whose skill list matches `skill` by case-insensitive
/// substring, either direction.
fn courses_teaching<'a>(courses: &'a [Course], skill: &str) -> impl Iterator<Item = &'a Course> {
    let needle = skill.to_lowercase();
    courses.iter().filter(move |course| {
        course.skills.iter().any(|s| {
            let s = s.to_lowercase();
            s.contains(&needle) || needle.contains(&s)
        })
    })
}

/// Whether the user already has a skill sharing the trend's first word.
fn has_related_skill(profile: &UserProfile, trend_skill: &str) -> bool {
    let Some(first_word) = trend_skill.to_lowercase().split_whitespace().next().map(str::to_string)
    else {
        return false;
    };
    profile.skills.iter().any(|s| s.name.contains(&first_word))
}
