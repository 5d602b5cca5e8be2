//! Skill-level inference from the text surrounding a skill mention.

use pathwise_core::SkillLevel;
use regex::Regex;
use std::sync::LazyLock;

/// Radius of the context window around each mention, in characters.
const CONTEXT_RADIUS: usize = 100;

/// Weight multiplier applied to year-phrase hits.
const YEAR_PHRASE_SCALE: f64 = 0.8;

/// Score contributed by a numeric "N years" hit to its bucket.
const NUMERIC_YEARS_SCORE: f64 = 0.8;

/// Per-level vocabulary, year phrases, and weight.
struct LevelProfile {
    level: SkillLevel,
    weight: f64,
    keywords: &'static [&'static str],
    year_phrases: &'static [&'static str],
}

/// Scoring tables, strongest level first so that score ties resolve in
/// favor of the earlier (default-biased) handling below.
const LEVEL_PROFILES: &[LevelProfile] = &[
    LevelProfile {
        level: SkillLevel::Expert,
        weight: 1.0,
        keywords: &[
            "expert", "mastery", "guru", "architect", "principal", "authority", "specialist",
        ],
        year_phrases: &["over 5 years", "more than 5 years", "5+ years", "a decade"],
    },
    LevelProfile {
        level: SkillLevel::Advanced,
        weight: 0.8,
        keywords: &[
            "advanced", "senior", "extensive", "deep", "strong", "lead", "proficient",
        ],
        year_phrases: &["over 3 years", "more than 3 years", "3+ years", "several years"],
    },
    LevelProfile {
        level: SkillLevel::Intermediate,
        weight: 0.6,
        keywords: &["intermediate", "comfortable", "solid", "competent", "hands-on"],
        year_phrases: &["over a year", "more than a year", "a few years", "couple of years"],
    },
    LevelProfile {
        level: SkillLevel::Beginner,
        weight: 0.3,
        keywords: &[
            "beginner", "basic", "learning", "familiar", "novice", "junior", "introduction",
            "fundamentals",
        ],
        year_phrases: &["less than a year", "a few months", "recently started"],
    },
];

static NUMERIC_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*\+?\s*years?").expect("numeric years pattern is valid")
});

/// Infer the proficiency level for `skill` from its mentions in `text`.
///
/// Each mention contributes a ±100-character context window; the windows
/// are concatenated and scored per level by keyword hits, textual
/// year phrases, and a bucketed numeric "N years" pattern. The highest
/// scoring level wins; ties and all-zero scores default to intermediate.
pub fn analyze_skill_level(text: &str, skill: &str) -> SkillLevel {
    let context = context_windows(text, skill).join(" ").to_lowercase();
    if context.is_empty() {
        return SkillLevel::Intermediate;
    }

    let mut scores = [0.0f64; 4];
    for profile in LEVEL_PROFILES {
        let idx = profile.level as usize;
        for keyword in profile.keywords {
            scores[idx] += count_occurrences(&context, keyword) as f64 * profile.weight;
        }
        for phrase in profile.year_phrases {
            scores[idx] += count_occurrences(&context, phrase) as f64 * profile.weight
                * YEAR_PHRASE_SCALE;
        }
    }

    for captures in NUMERIC_YEARS.captures_iter(&context) {
        if let Ok(years) = captures[1].parse::<u32>() {
            scores[years_bucket(years) as usize] += NUMERIC_YEARS_SCORE;
        }
    }

    pick_level(&scores)
}

/// Bucket a numeric years-of-experience figure into a level.
fn years_bucket(years: u32) -> SkillLevel {
    if years >= 5 {
        SkillLevel::Expert
    } else if years >= 3 {
        SkillLevel::Advanced
    } else if years >= 1 {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    }
}

/// Highest-scoring level; a tie between distinct levels, or all zeros,
/// yields intermediate.
fn pick_level(scores: &[f64; 4]) -> SkillLevel {
    const LEVELS: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    let max = scores.iter().cloned().fold(0.0f64, f64::max);
    if max == 0.0 {
        return SkillLevel::Intermediate;
    }
    let winners: Vec<SkillLevel> = LEVELS
        .iter()
        .copied()
        .filter(|l| scores[*l as usize] == max)
        .collect();
    if winners.len() == 1 {
        winners[0]
    } else {
        SkillLevel::Intermediate
    }
}

/// Extract ±`CONTEXT_RADIUS`-character windows around each mention of
/// `skill`, snapped to char boundaries.
pub fn context_windows(text: &str, skill: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let needle = skill.trim().to_lowercase();
    if needle.is_empty() || haystack.is_empty() {
        return Vec::new();
    }

    let mut windows = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let hit = from + pos;
        let mut start = hit.saturating_sub(CONTEXT_RADIUS);
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (hit + needle.len() + CONTEXT_RADIUS).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        windows.push(text[start..end].to_string());
        from = hit + needle.len();
    }
    windows
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.match_indices(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_intermediate_without_evidence() {
        assert_eq!(analyze_skill_level("", "python"), SkillLevel::Intermediate);
        assert_eq!(
            analyze_skill_level("I once saw python mentioned", "python"),
            SkillLevel::Intermediate
        );
        assert_eq!(
            analyze_skill_level("unrelated text", "python"),
            SkillLevel::Intermediate
        );
    }

    #[test]
    fn keywords_drive_levels() {
        assert_eq!(
            analyze_skill_level("I am an expert in python systems", "python"),
            SkillLevel::Expert
        );
        assert_eq!(
            analyze_skill_level("senior engineer with deep python knowledge", "python"),
            SkillLevel::Advanced
        );
        assert_eq!(
            analyze_skill_level("just learning python basics", "python"),
            SkillLevel::Beginner
        );
    }

    #[test]
    fn numeric_years_are_bucketed() {
        assert_eq!(
            analyze_skill_level("6 years of python", "python"),
            SkillLevel::Expert
        );
        assert_eq!(
            analyze_skill_level("4 years of python", "python"),
            SkillLevel::Advanced
        );
        assert_eq!(
            analyze_skill_level("2 years of python", "python"),
            SkillLevel::Intermediate
        );
    }

    #[test]
    fn level_is_monotonic_in_years() {
        // Only the numeric years figure varies; the inferred level must
        // never decrease as the figure grows.
        let levels: Vec<SkillLevel> = [0u32, 1, 2, 3, 4, 5, 6, 10, 20]
            .iter()
            .map(|n| analyze_skill_level(&format!("{n} years of python work"), "python"))
            .collect();
        for pair in levels.windows(2) {
            assert!(pair[1] >= pair[0], "levels regressed: {levels:?}");
        }
    }

    #[test]
    fn context_window_limits_evidence() {
        // The expert keyword sits far from the skill mention, outside the
        // ±100-char window, so it must not count.
        let filler = "x".repeat(250);
        let text = format!("expert {filler} python is mentioned here");
        assert_eq!(analyze_skill_level(&text, "python"), SkillLevel::Intermediate);
    }

    #[test]
    fn context_windows_snap_to_char_boundaries() {
        let text = format!("{}python{}", "é".repeat(80), "é".repeat(80));
        let windows = context_windows(&text, "python");
        assert_eq!(windows.len(), 1);
        assert!(windows[0].contains("python"));
    }

    #[test]
    fn multiple_mentions_accumulate() {
        let text = "python in one team. expert python architect on another.";
        assert_eq!(analyze_skill_level(text, "python"), SkillLevel::Expert);
    }
}
