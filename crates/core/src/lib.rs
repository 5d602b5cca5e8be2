//! Shared data model for the pathwise learning-content recommendation
//! engine.
//!
//! This crate defines:
//! - User-facing records: skills, profiles, goals, learning history
//! - Catalog records: courses and their metadata
//! - Per-request scoring artifacts: candidates, signals, recommendations
//! - The typed error surface of the core

mod error;
mod types;

pub use error::{EngineError, Result};
pub use types::{
    canonical_skill_name, CareerGoal, Confidence, Course, Difficulty, DifficultyPreference,
    Explanation, GoalPriority, HistoryStatus, LearningHistoryEntry, LearningPreferences,
    Recommendation, ScoredCandidate, SignalSource, Skill, SkillLevel, SkillOrigin, SourceKind,
    UserProfile,
};
