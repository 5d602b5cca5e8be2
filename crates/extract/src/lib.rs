//! Multi-method skill extraction from free text.
//!
//! This crate provides:
//! - A static skill catalog grouped by category
//! - Four independent extraction methods (direct, pattern, linguistic,
//!   section) behind a common trait
//! - Confidence-scored, deduplicated extraction with level inference
//! - Character-set Jaccard similarity used for fuzzy catalog matching

mod catalog;
mod level;
mod methods;
mod preprocess;
mod similarity;

pub use catalog::SkillCatalog;
pub use level::{analyze_skill_level, context_windows};
pub use methods::{
    DirectMatch, ExtractionMethod, LinguisticMatch, MethodKind, PatternMatch, RawCandidate,
    SectionMatch,
};
pub use preprocess::preprocess;
pub use similarity::{best_catalog_match, jaccard_chars, MATCH_THRESHOLD};

use pathwise_core::{Confidence, SkillLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Options controlling an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Skills below this confidence are dropped from the result.
    pub min_confidence: f64,
    /// Maximum number of skills returned.
    pub max_skills: usize,
    /// Attach the context windows each skill was mentioned in.
    pub include_context: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            max_skills: 50,
            include_context: false,
        }
    }
}

/// A skill extracted from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    /// Canonical (lowercase, trimmed) skill name.
    pub name: String,
    /// Highest confidence any method assigned to this name.
    pub confidence: Confidence,
    /// Inferred proficiency level.
    pub level: SkillLevel,
    /// Every method that contributed this skill, sorted and deduplicated.
    pub methods: Vec<MethodKind>,
    /// Context windows around mentions, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub context: Vec<String>,
}

/// The multi-method skill extractor.
///
/// Owns an ordered list of extraction methods; each runs independently
/// over the same preprocessed text and a failing method is skipped with
/// a warning rather than aborting the pipeline.
pub struct SkillExtractor {
    catalog: SkillCatalog,
    methods: Vec<Box<dyn ExtractionMethod>>,
}

impl SkillExtractor {
    /// Extractor with the built-in catalog and all four methods.
    pub fn new() -> Self {
        Self::with_catalog(SkillCatalog::builtin())
    }

    /// Extractor with a custom catalog and the default method set.
    pub fn with_catalog(catalog: SkillCatalog) -> Self {
        Self {
            catalog,
            methods: vec![
                Box::new(DirectMatch),
                Box::new(PatternMatch),
                Box::new(LinguisticMatch),
                Box::new(SectionMatch),
            ],
        }
    }

    /// Replace the method list. Adding or removing a method is a
    /// configuration change, not a code edit.
    pub fn with_methods(mut self, methods: Vec<Box<dyn ExtractionMethod>>) -> Self {
        self.methods = methods;
        self
    }

    /// The catalog this extractor matches against.
    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Extract a deduplicated, confidence-scored, leveled skill list.
    ///
    /// Never fails: method errors are isolated, and empty input yields an
    /// empty list.
    pub fn extract(&self, text: &str, options: &ExtractOptions) -> Vec<ExtractedSkill> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let cleaned = preprocess(text);

        // Merge by canonical name: max confidence, union of methods.
        let mut merged: BTreeMap<String, (f64, Vec<MethodKind>)> = BTreeMap::new();
        for method in &self.methods {
            let candidates = match method.run(&cleaned, &self.catalog) {
                Ok(candidates) => candidates,
                Err(error) => {
                    warn!(
                        method = method.kind().label(),
                        %error,
                        "extraction method failed; continuing without it"
                    );
                    continue;
                }
            };
            for candidate in candidates {
                let entry = merged
                    .entry(candidate.name)
                    .or_insert((0.0, Vec::new()));
                entry.0 = entry.0.max(candidate.confidence);
                if !entry.1.contains(&method.kind()) {
                    entry.1.push(method.kind());
                }
            }
        }

        let mut skills: Vec<ExtractedSkill> = merged
            .into_iter()
            .filter(|(_, (confidence, _))| *confidence >= options.min_confidence)
            .map(|(name, (confidence, mut methods))| {
                methods.sort();
                let level = analyze_skill_level(&cleaned, &name);
                let context = if options.include_context {
                    context_windows(&cleaned, &name)
                } else {
                    Vec::new()
                };
                ExtractedSkill {
                    name,
                    confidence: Confidence::new(confidence),
                    level,
                    methods,
                    context,
                }
            })
            .collect();

        // Descending by confidence; name breaks ties deterministically.
        skills.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        skills.truncate(options.max_skills);
        skills
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_input_yields_empty_list() {
        let extractor = SkillExtractor::new();
        assert!(extractor.extract("", &ExtractOptions::default()).is_empty());
        assert!(extractor
            .extract("   \n\t ", &ExtractOptions::default())
            .is_empty());
    }

    #[test]
    fn resume_like_text_extracts_known_skills() {
        let extractor = SkillExtractor::new();
        let text = "Senior engineer with 6 years of python experience.\n\
                    Skills: docker, kubernetes, postgresql\n\
                    Proficient in rust and machine learning.";
        let skills = extractor.extract(text, &ExtractOptions::default());

        let names: HashSet<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        for expected in ["python", "docker", "kubernetes", "postgresql", "rust"] {
            assert!(names.contains(expected), "missing {expected} in {names:?}");
        }

        // "senior" and "proficient" sit inside the context window along
        // with the 6-year figure; advanced-or-better either way.
        let python = skills.iter().find(|s| s.name == "python").unwrap();
        assert!(python.level >= SkillLevel::Advanced);
        assert!(python.methods.contains(&MethodKind::Direct));
    }

    #[test]
    fn results_are_deduplicated_with_max_confidence() {
        let extractor = SkillExtractor::new();
        // "python" hits direct (0.9), pattern (0.7), and linguistic (0.6).
        let text = "Skills: python. Experience with python. python everywhere.";
        let skills = extractor.extract(text, &ExtractOptions::default());

        let pythons: Vec<&ExtractedSkill> =
            skills.iter().filter(|s| s.name == "python").collect();
        assert_eq!(pythons.len(), 1);
        assert_eq!(pythons[0].confidence.value(), 0.9);
        assert!(pythons[0].methods.len() >= 2);
    }

    #[test]
    fn min_confidence_filters_results() {
        let extractor = SkillExtractor::new();
        let text = "worked with pythn daily"; // linguistic-only, 5/6 × 0.6 = 0.5
        let strict = ExtractOptions {
            min_confidence: 0.6,
            ..Default::default()
        };
        assert!(!extractor
            .extract(text, &strict)
            .iter()
            .any(|s| s.name == "python"));

        let lenient = ExtractOptions {
            min_confidence: 0.4,
            ..Default::default()
        };
        assert!(extractor
            .extract(text, &lenient)
            .iter()
            .any(|s| s.name == "python"));
    }

    #[test]
    fn max_skills_truncates_sorted_output() {
        let extractor = SkillExtractor::new();
        let text = "Skills: python, docker, kubernetes, postgresql, redis, rust, java";
        let options = ExtractOptions {
            max_skills: 3,
            ..Default::default()
        };
        let skills = extractor.extract(text, &options);
        assert_eq!(skills.len(), 3);
        for pair in skills.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn context_is_attached_only_on_request() {
        let extractor = SkillExtractor::new();
        let text = "years of python in production";

        let without = extractor.extract(text, &ExtractOptions::default());
        assert!(without.iter().all(|s| s.context.is_empty()));

        let with = extractor.extract(
            text,
            &ExtractOptions {
                include_context: true,
                ..Default::default()
            },
        );
        let python = with.iter().find(|s| s.name == "python").unwrap();
        assert_eq!(python.context.len(), 1);
        assert!(python.context[0].contains("python"));
    }

    #[test]
    fn serialized_skills_use_stable_labels_and_omit_empty_context() {
        let extractor = SkillExtractor::new();
        let skills = extractor.extract("Skills: python", &ExtractOptions::default());
        let json = serde_json::to_value(&skills).unwrap();

        let python = &json[0];
        assert_eq!(python["name"], "python");
        assert_eq!(python["level"], "intermediate");
        assert_eq!(python["methods"][0], "direct");
        // Confidence serializes transparently as a bare number.
        assert_eq!(python["confidence"], 0.9);
        // Context is only present when requested.
        assert!(python.get("context").is_none());
    }

    #[test]
    fn failing_method_is_isolated() {
        struct Broken;
        impl ExtractionMethod for Broken {
            fn kind(&self) -> MethodKind {
                MethodKind::Pattern
            }
            fn run(
                &self,
                _text: &str,
                _catalog: &SkillCatalog,
            ) -> anyhow::Result<Vec<RawCandidate>> {
                anyhow::bail!("synthetic failure")
            }
        }

        let extractor = SkillExtractor::new()
            .with_methods(vec![Box::new(Broken), Box::new(DirectMatch)]);
        let skills = extractor.extract("python and docker", &ExtractOptions::default());
        assert!(skills.iter().any(|s| s.name == "python"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Confidence bounds and name uniqueness hold for arbitrary
            // input, including pathological unicode.
            #[test]
            fn confidences_bounded_and_names_unique(text in ".{0,400}") {
                let extractor = SkillExtractor::new();
                let skills = extractor.extract(&text, &ExtractOptions::default());

                let mut seen = HashSet::new();
                for skill in &skills {
                    prop_assert!(skill.confidence.value() >= 0.0);
                    prop_assert!(skill.confidence.value() <= 1.0);
                    prop_assert!(seen.insert(skill.name.clone()), "duplicate {}", skill.name);
                }
            }

            #[test]
            fn output_never_exceeds_max_skills(text in ".{0,400}", max in 1usize..20) {
                let extractor = SkillExtractor::new();
                let options = ExtractOptions { max_skills: max, ..Default::default() };
                prop_assert!(extractor.extract(&text, &options).len() <= max);
            }
        }
    }
}
