//! Section matching: skill-section headers and the list items under
//! them.
//!
//! Boundary detection is an explicit two-pointer scan over line
//! boundaries: a section starts at a recognized header line and ends at
//! the next header or the first blank line, whichever comes first. This
//! keeps end-of-text and missing-next-header cases unambiguous.

use super::{is_valid_token, ExtractionMethod, MethodKind, RawCandidate};
use crate::catalog::SkillCatalog;
use crate::similarity::{best_catalog_match, MATCH_THRESHOLD};

/// Base confidence assigned to an item found inside a skill section,
/// scaled by the catalog match similarity.
const SECTION_CONFIDENCE: f64 = 0.8;

/// Headers that introduce a skill section.
const SECTION_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "technologies",
    "expertise",
    "competencies",
    "proficiencies",
    "tools",
    "tech stack",
];

/// Extraction from explicitly labeled skill sections.
#[derive(Debug, Default)]
pub struct SectionMatch;

impl ExtractionMethod for SectionMatch {
    fn kind(&self) -> MethodKind {
        MethodKind::Section
    }

    fn run(&self, text: &str, catalog: &SkillCatalog) -> anyhow::Result<Vec<RawCandidate>> {
        let lines: Vec<&str> = text.lines().collect();
        let mut candidates = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let Some(inline_rest) = header_rest(lines[i]) else {
                i += 1;
                continue;
            };

            // Section body: the remainder of the header line plus every
            // following line up to the next header or a blank line.
            let mut body = String::from(inline_rest);
            let mut j = i + 1;
            while j < lines.len() {
                let line = lines[j];
                if line.trim().is_empty() || header_rest(line).is_some() {
                    break;
                }
                body.push('\n');
                body.push_str(line);
                j += 1;
            }

            for item in body.split([',', ';', '\n']) {
                let item = item.trim().trim_start_matches('-').trim();
                if !is_valid_token(item) {
                    continue;
                }
                if let Some((skill, similarity)) =
                    best_catalog_match(item, catalog.skills(), MATCH_THRESHOLD)
                {
                    candidates.push(RawCandidate::new(skill, SECTION_CONFIDENCE * similarity));
                }
            }

            // Resume the scan at the line that ended this section so a
            // directly following header starts its own section.
            i = j.max(i + 1);
        }

        Ok(candidates)
    }
}

/// If the line is a skill-section header, return the text after the
/// colon (possibly empty).
fn header_rest(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let (head, rest) = trimmed.split_once(':')?;
    let head = head.trim().to_lowercase();
    SECTION_HEADERS
        .iter()
        .any(|h| head == *h)
        .then_some(rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<RawCandidate> {
        SectionMatch
            .run(text, &SkillCatalog::builtin())
            .expect("section match never fails")
    }

    #[test]
    fn inline_header_list_is_extracted() {
        let candidates = run("Skills: python, docker, kubernetes");
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["python", "docker", "kubernetes"]);
        assert!(candidates
            .iter()
            .all(|c| (c.confidence - SECTION_CONFIDENCE).abs() < 1e-9));
    }

    #[test]
    fn section_spans_until_blank_line() {
        let text = "Technologies:\npython\nrust\n\nnot a skill list: gardening";
        let names: Vec<String> = run(text).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["python", "rust"]);
    }

    #[test]
    fn section_ends_at_next_header() {
        let text = "Skills: python\nTools: docker";
        let names: Vec<String> = run(text).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["python", "docker"]);
    }

    #[test]
    fn section_at_end_of_text_is_closed() {
        let names: Vec<String> = run("Expertise:\nsql").into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["sql"]);
    }

    #[test]
    fn fuzzy_items_scale_by_similarity() {
        let candidates = run("Skills: pythn");
        let python = candidates.iter().find(|c| c.name == "python").unwrap();
        assert!((python.confidence - SECTION_CONFIDENCE * (5.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn unknown_items_are_dropped() {
        assert!(run("Skills: juggling, 42, x").is_empty());
    }

    #[test]
    fn no_headers_no_candidates() {
        assert!(run("python docker kubernetes everywhere").is_empty());
    }
}
