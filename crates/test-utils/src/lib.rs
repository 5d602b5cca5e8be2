//! Shared test fixtures for pathwise crates.
//!
//! This crate provides compact builders for users, courses, and history
//! entries so scorer and engine tests read as scenarios rather than
//! struct literals.

use pathwise_core::{
    CareerGoal, Confidence, Course, Difficulty, GoalPriority, HistoryStatus,
    LearningHistoryEntry, Skill, SkillLevel, SkillOrigin, UserProfile,
};

/// A minimal course: intermediate difficulty, empty skills, generic
/// category/provider.
pub fn course(id: &str, title: &str) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        skills: Vec::new(),
        category: "general".to_string(),
        provider: "provider-a".to_string(),
        difficulty: Difficulty::Intermediate,
    }
}

/// A fully specified course.
#[allow(clippy::too_many_arguments)]
pub fn course_full(
    id: &str,
    title: &str,
    description: &str,
    skills: &[&str],
    category: &str,
    provider: &str,
    difficulty: Difficulty,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
        category: category.to_string(),
        provider: provider.to_string(),
        difficulty,
    }
}

/// A learning-history entry.
pub fn history_entry(
    course_id: &str,
    status: HistoryStatus,
    progress: f64,
    rating: Option<u8>,
) -> LearningHistoryEntry {
    LearningHistoryEntry {
        course_id: course_id.to_string(),
        status,
        progress,
        time_spent_minutes: 60,
        rating,
    }
}

/// A user with only a learning history.
pub fn user_with_history(id: &str, history: Vec<LearningHistoryEntry>) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        learning_history: history,
        ..Default::default()
    }
}

/// A user with manual skills at intermediate level and full confidence.
pub fn user_with_skills(id: &str, skills: &[&str]) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        skills: skills
            .iter()
            .map(|name| {
                Skill::new(
                    name,
                    SkillLevel::Intermediate,
                    Confidence::full(),
                    SkillOrigin::Manual,
                )
            })
            .collect(),
        ..Default::default()
    }
}

/// A career goal with no target date (always active).
pub fn goal(title: &str, required_skills: &[&str]) -> CareerGoal {
    CareerGoal {
        title: title.to_string(),
        required_skills: required_skills.iter().map(|s| (*s).to_string()).collect(),
        target_date: None,
        priority: GoalPriority::Medium,
    }
}

/// Attach a skill at an explicit level to a profile.
pub fn with_skill_at(mut profile: UserProfile, name: &str, level: SkillLevel) -> UserProfile {
    profile.skills.push(Skill::new(
        name,
        level,
        Confidence::full(),
        SkillOrigin::Manual,
    ));
    profile
}
