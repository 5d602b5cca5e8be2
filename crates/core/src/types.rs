//! Shared data model for the pathwise recommendation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence score clamped to [0.0, 1.0] range.
///
/// This newtype ensures confidence values are always valid by clamping
/// any input to the valid range during construction.
///
/// # Examples
///
/// ```
/// use pathwise_core::Confidence;
///
/// // Normal values are preserved
/// let c = Confidence::new(0.75);
/// assert_eq!(c.value(), 0.75);
///
/// // Values are clamped to valid range
/// let high = Confidence::new(1.5);
/// assert_eq!(high.value(), 1.0);
///
/// let low = Confidence::new(-0.5);
/// assert_eq!(low.value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a new Confidence, clamping the value to [0.0, 1.0].
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the inner confidence value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Create a zero confidence score.
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Create a full confidence score (1.0).
    #[must_use]
    pub fn full() -> Self {
        Self(1.0)
    }

    /// Keep the larger of the two scores. Re-extraction never regresses
    /// a skill's confidence.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

/// Proficiency level attached to a skill.
///
/// Ordered so that level comparisons (e.g. "holds this skill at
/// advanced or better") read naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Returns a stable label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// Where a skill entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillOrigin {
    /// Entered by the user directly.
    Manual,
    /// Produced by the extraction pipeline.
    Extracted,
    /// Derived from other signals (history, goals).
    Inferred,
    /// Confirmed by an assessment or credential.
    Verified,
}

/// A single skill held by a user.
///
/// Invariant: one `Skill` per distinct canonical name per user. The name is
/// the lowercase, trimmed dedup key; merging a repeated name takes the
/// maximum confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Canonical (lowercase, trimmed) skill name.
    pub name: String,
    /// Proficiency level.
    pub level: SkillLevel,
    /// How certain we are the user holds this skill.
    pub confidence: Confidence,
    /// Provenance of this entry.
    pub origin: SkillOrigin,
}

impl Skill {
    /// Build a skill, canonicalizing the name.
    pub fn new(name: &str, level: SkillLevel, confidence: Confidence, origin: SkillOrigin) -> Self {
        Self {
            name: canonical_skill_name(name),
            level,
            confidence,
            origin,
        }
    }
}

/// Lowercase, trimmed form used as the dedup key for skills.
pub fn canonical_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Priority of a career goal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A career goal the user is working toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGoal {
    /// Goal title, e.g. "Machine Learning Engineer".
    pub title: String,
    /// Skills the goal requires.
    pub required_skills: Vec<String>,
    /// Optional target date. A goal with no target date, or one in the
    /// future, is considered active.
    pub target_date: Option<DateTime<Utc>>,
    /// How important this goal is to the user.
    pub priority: GoalPriority,
}

impl CareerGoal {
    /// Whether this goal is still active at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.target_date {
            Some(date) => date >= now,
            None => true,
        }
    }
}

/// Stated difficulty preference for recommended content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifficultyPreference {
    /// Prefer beginner-level courses.
    BeginnerFriendly,
    /// No strong preference.
    #[default]
    Mixed,
    /// Prefer advanced/expert-level courses.
    Challenging,
}

/// Learning preferences attached to a profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningPreferences {
    /// Preferred learning pace, e.g. "self-paced".
    #[serde(default)]
    pub pace: Option<String>,
    /// Preferred content format, e.g. "video".
    #[serde(default)]
    pub format: Option<String>,
    /// Difficulty preference bucket.
    #[serde(default)]
    pub difficulty: DifficultyPreference,
    /// Preferred session duration in minutes.
    #[serde(default)]
    pub session_minutes: Option<u32>,
}

/// Progress status of a learning-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryStatus {
    Enrolled,
    InProgress,
    Completed,
    Dropped,
    Paused,
}

/// One user's record for one course. Append/update only; one entry per
/// (user, course) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningHistoryEntry {
    /// Course this entry refers to.
    pub course_id: String,
    /// Current status.
    pub status: HistoryStatus,
    /// Completion percentage in [0, 100].
    pub progress: f64,
    /// Total time spent, in minutes.
    pub time_spent_minutes: u32,
    /// Optional 1-5 star rating.
    #[serde(default)]
    pub rating: Option<u8>,
}

/// A user profile: skills, goals, preferences, interests, and history.
///
/// Created at signup and mutated by extraction, manual edits, and goal
/// updates. Deletion is an external-store concern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: String,
    /// Deduplicated skills, keyed by canonical name.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Career goals.
    #[serde(default)]
    pub career_goals: Vec<CareerGoal>,
    /// Learning preferences.
    #[serde(default)]
    pub preferences: LearningPreferences,
    /// Free-form interests, e.g. "web development".
    #[serde(default)]
    pub interests: Vec<String>,
    /// Learning history, one entry per course.
    #[serde(default)]
    pub learning_history: Vec<LearningHistoryEntry>,
}

impl UserProfile {
    /// Look up a skill by canonical name.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        let canonical = canonical_skill_name(name);
        self.skills.iter().find(|s| s.name == canonical)
    }

    /// Whether the user holds `name` (substring-aware, either direction)
    /// at `at_least` or better.
    pub fn holds_skill_at(&self, name: &str, at_least: SkillLevel) -> bool {
        let needle = canonical_skill_name(name);
        self.skills
            .iter()
            .any(|s| (s.name.contains(&needle) || needle.contains(&s.name)) && s.level >= at_least)
    }

    /// The history entry for a course, if any.
    pub fn history_for(&self, course_id: &str) -> Option<&LearningHistoryEntry> {
        self.learning_history
            .iter()
            .find(|e| e.course_id == course_id)
    }

    /// Course ids the user has completed.
    pub fn completed_course_ids(&self) -> Vec<&str> {
        self.learning_history
            .iter()
            .filter(|e| e.status == HistoryStatus::Completed)
            .map(|e| e.course_id.as_str())
            .collect()
    }

    /// Merge an extracted skill into the profile, never regressing
    /// confidence for an already-known name.
    pub fn merge_skill(&mut self, incoming: Skill) {
        match self.skills.iter_mut().find(|s| s.name == incoming.name) {
            Some(existing) => {
                existing.confidence = existing.confidence.max(incoming.confidence);
                if incoming.level > existing.level {
                    existing.level = incoming.level;
                }
            }
            None => self.skills.push(incoming),
        }
    }
}

/// Course difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// Returns a stable label for this difficulty.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// A course from the content catalog. Read-only from the core's
/// perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Stable course identifier.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Course description.
    pub description: String,
    /// Skills the course teaches.
    pub skills: Vec<String>,
    /// Category, e.g. "data science".
    pub category: String,
    /// Provider, e.g. "coursera".
    pub provider: String,
    /// Difficulty rating.
    pub difficulty: Difficulty,
}

/// Which scorer produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Collaborative,
    Content,
    Market,
    Behavioral,
}

impl SourceKind {
    /// Get a short label for this source.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Collaborative => "collaborative",
            Self::Content => "content",
            Self::Market => "market",
            Self::Behavioral => "behavioral",
        }
    }
}

/// One scorer's contribution to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSource {
    /// Which scorer produced this signal.
    pub kind: SourceKind,
    /// Raw per-source score.
    pub score: f64,
    /// Human-readable reason for the signal.
    pub reason: String,
}

/// A scored course candidate, produced per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Course this candidate refers to.
    pub course_id: String,
    /// Score; per-source before combination, weighted after.
    pub score: f64,
    /// Contributing signals.
    pub sources: Vec<SignalSource>,
}

impl ScoredCandidate {
    /// Build a single-source candidate.
    pub fn new(course_id: &str, score: f64, kind: SourceKind, reason: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            score,
            sources: vec![SignalSource {
                kind,
                score,
                reason: reason.to_string(),
            }],
        }
    }
}

/// Why a recommendation was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Reason string from the first contributing source.
    pub primary_reason: String,
    /// All contributing source kinds, in contribution order.
    pub sources: Vec<SourceKind>,
    /// Combined score capped to [0, 1].
    pub confidence: Confidence,
}

/// A final, enriched recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended course id.
    pub course_id: String,
    /// Combined, weighted score.
    pub score: f64,
    /// Full course record.
    pub course: Course,
    /// Why this course was recommended.
    pub explanation: Explanation,
}
