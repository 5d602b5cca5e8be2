//! Linguistic matching: noun/adjective/organization-style term
//! candidates compared against the catalog by character-set similarity.
//!
//! There is no full part-of-speech tagger here; candidate terms are
//! content words (non-stopword tokens) plus capitalized sequences, which
//! covers the nouns, adjectives, and named organizations the method is
//! after. Matching is typo-tolerant: "pythn" still resolves to "python".

use super::{ExtractionMethod, MethodKind, RawCandidate};
use crate::catalog::SkillCatalog;
use crate::similarity::{best_catalog_match, MATCH_THRESHOLD};
use std::collections::HashSet;

/// Scale applied to the similarity score of an accepted match.
const LINGUISTIC_CONFIDENCE_SCALE: f64 = 0.6;

/// Function words that are never skill candidates.
const FUNCTION_WORDS: &[&str] = &[
    "the", "and", "for", "with", "have", "has", "had", "are", "was", "were", "been", "being",
    "this", "that", "these", "those", "from", "into", "over", "under", "about", "after", "before",
    "while", "where", "when", "which", "what", "who", "whom", "whose", "how", "why", "all", "any",
    "both", "each", "few", "more", "most", "some", "such", "not", "only", "own", "same", "than",
    "too", "very", "can", "will", "just", "also", "years", "experience", "working", "worked",
    "using", "used", "team", "project", "projects",
];

/// Term-candidate extraction with fuzzy catalog matching.
#[derive(Debug, Default)]
pub struct LinguisticMatch;

impl ExtractionMethod for LinguisticMatch {
    fn kind(&self) -> MethodKind {
        MethodKind::Linguistic
    }

    fn run(&self, text: &str, catalog: &SkillCatalog) -> anyhow::Result<Vec<RawCandidate>> {
        let mut candidates = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for term in candidate_terms(text) {
            if let Some((skill, similarity)) =
                best_catalog_match(&term, catalog.skills(), MATCH_THRESHOLD)
            {
                // Record the catalog name, not the raw term, so typos
                // collapse onto the canonical skill.
                if seen.insert(skill.to_string()) {
                    candidates.push(RawCandidate::new(
                        skill,
                        similarity * LINGUISTIC_CONFIDENCE_SCALE,
                    ));
                }
            }
        }

        Ok(candidates)
    }
}

/// Content-word and capitalized-sequence candidates from the text.
fn candidate_terms(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut capitalized_run: Vec<&str> = Vec::new();

    for word in text.split(|c: char| !c.is_alphanumeric() && !matches!(c, '+' | '#' | '.')) {
        let word = word.trim_matches('.');
        if word.is_empty() {
            capitalized_run.clear();
            continue;
        }

        // Organization-style names: runs of capitalized words.
        if word.chars().next().is_some_and(|c| c.is_uppercase()) {
            capitalized_run.push(word);
            if capitalized_run.len() > 1 {
                terms.push(capitalized_run.join(" "));
            }
        } else {
            capitalized_run.clear();
        }

        let lower = word.to_lowercase();
        if lower.len() >= 3 && !FUNCTION_WORDS.contains(&lower.as_str()) {
            terms.push(lower);
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<RawCandidate> {
        LinguisticMatch
            .run(text, &SkillCatalog::builtin())
            .expect("linguistic match never fails")
    }

    #[test]
    fn typo_resolves_to_catalog_name() {
        let candidates = run("shipped several pythn services");
        let python = candidates.iter().find(|c| c.name == "python").unwrap();
        // similarity 5/6, scaled by 0.6
        assert!((python.confidence - (5.0 / 6.0) * 0.6).abs() < 1e-9);
    }

    #[test]
    fn exact_term_scores_full_scale() {
        let candidates = run("deployed with docker every week");
        let docker = candidates.iter().find(|c| c.name == "docker").unwrap();
        assert!((docker.confidence - LINGUISTIC_CONFIDENCE_SCALE).abs() < 1e-9);
    }

    #[test]
    fn below_threshold_terms_are_dropped() {
        // "jav" vs "javascript" is 1/3 similarity; nothing should match.
        let candidates = run("jav beans on toast");
        assert!(!candidates.iter().any(|c| c.name == "javascript"));
    }

    #[test]
    fn function_words_are_ignored() {
        assert!(run("the and with from have").is_empty());
    }

    #[test]
    fn duplicate_mentions_collapse() {
        let candidates = run("docker docker docker");
        assert_eq!(candidates.iter().filter(|c| c.name == "docker").count(), 1);
    }
}
