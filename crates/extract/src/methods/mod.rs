//! The four extraction methods behind the skill extractor.
//!
//! Each method is an independent pass over the same preprocessed text.
//! Adding or removing a method is a configuration change on the
//! extractor, not a code edit elsewhere.

mod direct;
mod linguistic;
mod pattern;
mod section;

pub use direct::DirectMatch;
pub use linguistic::LinguisticMatch;
pub use pattern::PatternMatch;
pub use section::SectionMatch;

use crate::catalog::SkillCatalog;
use serde::{Deserialize, Serialize};

/// Identifies which extraction method produced a candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Exact or partial catalog substring match.
    Direct,
    /// Experience/technology/certification phrase templates.
    Pattern,
    /// Part-of-speech-style term candidates matched by character-set
    /// similarity.
    Linguistic,
    /// Skill-section headers and the list items under them.
    Section,
}

impl MethodKind {
    /// Get a short label for this method.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Pattern => "pattern",
            Self::Linguistic => "linguistic",
            Self::Section => "section",
        }
    }
}

/// An unmerged candidate produced by one method.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    /// Canonical (lowercase, trimmed) skill name.
    pub name: String,
    /// Method-specific confidence in [0, 1].
    pub confidence: f64,
}

impl RawCandidate {
    /// Build a candidate, canonicalizing the name.
    pub fn new(name: &str, confidence: f64) -> Self {
        Self {
            name: pathwise_core::canonical_skill_name(name),
            confidence,
        }
    }
}

/// One extraction pass over preprocessed text.
///
/// A failing method is isolated by the extractor: it contributes zero
/// candidates and the remaining methods still run.
pub trait ExtractionMethod: Send + Sync {
    /// Which method this is.
    fn kind(&self) -> MethodKind;

    /// Run the pass and return unmerged candidates.
    fn run(&self, text: &str, catalog: &SkillCatalog) -> anyhow::Result<Vec<RawCandidate>>;
}

/// Tokens that look like skill mentions but never are.
const STOP_LIST: &[&str] = &[
    "experience",
    "experiences",
    "team",
    "teams",
    "year",
    "years",
    "work",
    "working",
    "skill",
    "skills",
    "knowledge",
    "technologies",
    "tools",
    "and",
    "the",
    "various",
    "other",
    "others",
    "etc",
];

/// Validate a token captured by pattern or section matching.
///
/// Rejects pure numbers, tokens outside 2..=50 chars, and stop-listed
/// words.
pub(crate) fn is_valid_token(token: &str) -> bool {
    let token = token.trim();
    if token.len() < 2 || token.len() > 50 {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !STOP_LIST.contains(&token.to_lowercase().as_str())
}
