//! Static catalog of known skills, grouped by category.
//!
//! The catalog is the reference vocabulary for extraction: direct and
//! section matching look names up here, and linguistic matching compares
//! candidate terms against it. Categorization helpers answer which
//! category a known skill belongs to.

use std::sync::LazyLock;

/// Category name plus the skills it contains.
static BUILTIN_CATALOG: LazyLock<Vec<(&'static str, Vec<&'static str>)>> = LazyLock::new(|| {
    vec![
        (
            "programming",
            vec![
                "python",
                "javascript",
                "typescript",
                "java",
                "c++",
                "c#",
                "rust",
                "go",
                "ruby",
                "php",
                "swift",
                "kotlin",
                "scala",
                "r",
            ],
        ),
        (
            "web development",
            vec![
                "html",
                "css",
                "react",
                "angular",
                "vue",
                "node.js",
                "django",
                "flask",
                "spring",
                "express",
                "next.js",
                "rest api",
                "graphql",
            ],
        ),
        (
            "data science",
            vec![
                "machine learning",
                "deep learning",
                "data analysis",
                "data visualization",
                "statistics",
                "pandas",
                "numpy",
                "tensorflow",
                "pytorch",
                "scikit-learn",
                "natural language processing",
                "computer vision",
            ],
        ),
        (
            "cloud computing",
            vec![
                "aws",
                "azure",
                "google cloud",
                "docker",
                "kubernetes",
                "terraform",
                "jenkins",
                "ci/cd",
                "devops",
                "serverless",
                "microservices",
            ],
        ),
        (
            "databases",
            vec![
                "sql",
                "mysql",
                "postgresql",
                "mongodb",
                "redis",
                "elasticsearch",
                "cassandra",
                "sqlite",
            ],
        ),
        (
            "mobile development",
            vec!["android", "ios", "react native", "flutter", "xamarin"],
        ),
        (
            "soft skills",
            vec![
                "leadership",
                "communication",
                "project management",
                "agile",
                "scrum",
                "teamwork",
                "problem solving",
                "mentoring",
                "public speaking",
            ],
        ),
    ]
});

/// Static mapping of category to known skill names.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl SkillCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN_CATALOG
                .iter()
                .map(|(cat, skills)| {
                    (
                        (*cat).to_string(),
                        skills.iter().map(|s| (*s).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Build a catalog from explicit category/skill pairs. Names are
    /// lowercased on the way in.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            categories: entries
                .into_iter()
                .map(|(cat, skills)| {
                    (
                        cat.to_lowercase(),
                        skills.into_iter().map(|s| s.to_lowercase()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Iterate all known skill names.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|(_, skills)| skills.iter().map(String::as_str))
    }

    /// Iterate category names.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(cat, _)| cat.as_str())
    }

    /// Which category a known skill belongs to.
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        let needle = skill.trim().to_lowercase();
        self.categories
            .iter()
            .find(|(_, skills)| skills.iter().any(|s| *s == needle))
            .map(|(cat, _)| cat.as_str())
    }

    /// Whether the catalog knows this skill name.
    pub fn contains(&self, skill: &str) -> bool {
        self.category_of(skill).is_some()
    }

    /// Number of known skills across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, skills)| skills.len()).sum()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_populated() {
        let catalog = SkillCatalog::builtin();
        assert!(catalog.len() > 50);
        assert!(catalog.contains("python"));
        assert!(catalog.contains("machine learning"));
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.category_of("Python"), Some("programming"));
        assert_eq!(catalog.category_of(" KUBERNETES "), Some("cloud computing"));
        assert_eq!(catalog.category_of("underwater basket weaving"), None);
    }

    #[test]
    fn custom_catalog_lowercases_entries() {
        let catalog = SkillCatalog::from_entries(vec![(
            "Languages".to_string(),
            vec!["Esperanto".to_string()],
        )]);
        assert!(catalog.contains("esperanto"));
        assert_eq!(catalog.category_of("esperanto"), Some("languages"));
    }
}
