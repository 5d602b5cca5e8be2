//! Phrase-template matching: "experience with X", "proficient in X",
//! "certified in X" and friends.

use super::{is_valid_token, ExtractionMethod, MethodKind, RawCandidate};
use crate::catalog::SkillCatalog;
use regex::Regex;
use std::sync::LazyLock;

/// Confidence for a pattern-extracted token.
const PATTERN_CONFIDENCE: f64 = 0.7;

/// Experience, technology, and certification phrase templates. Each
/// captures the span naming the skill(s); the span is split on `,;` and
/// validated token by token.
static TEMPLATES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bexperienced?\s+(?:with|in|using)\s+([^.!?\n]+)",
        r"(?i)\bproficien(?:t|cy)\s+(?:with|in)\s+([^.!?\n]+)",
        r"(?i)\bskilled\s+(?:with|in|at)\s+([^.!?\n]+)",
        r"(?i)\bknowledge\s+of\s+([^.!?\n]+)",
        r"(?i)\bexpertise\s+in\s+([^.!?\n]+)",
        r"(?i)\bworked?\s+(?:with|on)\s+([^.!?\n]+)",
        r"(?i)\bfamiliar(?:ity)?\s+with\s+([^.!?\n]+)",
        r"(?i)\bbackground\s+in\s+([^.!?\n]+)",
        r"(?i)\bcertifie(?:d|r)\s+in\s+([^.!?\n]+)",
        r"(?i)\bcertification\s+in\s+([^.!?\n]+)",
        r"(?i)\busing\s+technologies\s+(?:like|such\s+as)\s+([^.!?\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("pattern templates are valid regexes"))
    .collect()
});

/// Regex-template extraction of skill mentions from experience phrases.
#[derive(Debug, Default)]
pub struct PatternMatch;

impl ExtractionMethod for PatternMatch {
    fn kind(&self) -> MethodKind {
        MethodKind::Pattern
    }

    fn run(&self, text: &str, _catalog: &SkillCatalog) -> anyhow::Result<Vec<RawCandidate>> {
        let mut candidates = Vec::new();

        for template in TEMPLATES.iter() {
            for captures in template.captures_iter(text) {
                let Some(span) = captures.get(1) else {
                    continue;
                };
                for token in split_skill_list(span.as_str()) {
                    if is_valid_token(&token) {
                        candidates.push(RawCandidate::new(&token, PATTERN_CONFIDENCE));
                    }
                }
            }
        }

        Ok(candidates)
    }
}

/// Split a captured span into individual skill tokens.
///
/// Splits on `,` and `;`, then peels a trailing "and"-joined pair from
/// each piece ("python, sql and docker" → python / sql / docker).
fn split_skill_list(span: &str) -> Vec<String> {
    span.split([',', ';'])
        .flat_map(|piece| {
            piece
                .split(" and ")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
