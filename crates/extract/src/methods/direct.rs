//! Direct catalog matching: exact substring hits and partial
//! multi-word hits.

use super::{ExtractionMethod, MethodKind, RawCandidate};
use crate::catalog::SkillCatalog;

/// Confidence for an exact substring match.
const EXACT_CONFIDENCE: f64 = 0.9;
/// Base confidence for a partial multi-word match, scaled by the
/// fraction of words present.
const PARTIAL_CONFIDENCE: f64 = 0.7;
/// Minimum fraction of a multi-word entry's words that must appear.
const PARTIAL_WORD_FRACTION: f64 = 0.7;

/// Exact and partial matching against the skill catalog.
#[derive(Debug, Default)]
pub struct DirectMatch;

impl ExtractionMethod for DirectMatch {
    fn kind(&self) -> MethodKind {
        MethodKind::Direct
    }

    fn run(&self, text: &str, catalog: &SkillCatalog) -> anyhow::Result<Vec<RawCandidate>> {
        let text_lower = text.to_lowercase();
        // Entries this short ("r", "go", "c#") would substring-match almost
        // any text, so they must match a whole token instead.
        let tokens: Vec<&str> = text_lower
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')'))
            .map(|t| t.trim_matches('.'))
            .collect();
        let mut candidates = Vec::new();

        for skill in catalog.skills() {
            let hit = if skill.len() <= 2 {
                tokens.iter().any(|t| *t == skill)
            } else {
                text_lower.contains(skill)
            };
            if hit {
                candidates.push(RawCandidate::new(skill, EXACT_CONFIDENCE));
                continue;
            }

            // Multi-word entries also accept a partial match when most of
            // their words appear somewhere in the text.
            let words: Vec<&str> = skill.split_whitespace().collect();
            if words.len() < 2 {
                continue;
            }
            let matched = words.iter().filter(|w| text_lower.contains(**w)).count();
            let fraction = matched as f64 / words.len() as f64;
            if fraction >= PARTIAL_WORD_FRACTION {
                candidates.push(RawCandidate::new(skill, PARTIAL_CONFIDENCE * fraction));
            }
        }

        Ok(candidates)
    }
}
