//! Canonical skills and their synonym families

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Built-in synonym families. Each canonical skill expands to its synonyms.
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "node", "nodejs", "react", "vue", "angular"]),
    ("python", &["django", "flask", "fastapi", "pandas", "numpy"]),
    ("java", &["spring", "hibernate", "maven", "gradle"]),
    ("php", &["laravel", "symfony", "wordpress", "drupal"]),
    ("sql", &["mysql", "postgresql", "oracle", "mongodb"]),
    ("html", &["css", "sass", "less", "bootstrap"]),
    ("git", &["github", "gitlab", "bitbucket"]),
    ("docker", &["kubernetes", "containerisation"]),
    ("aws", &["azure", "gcp", "cloud"]),
    ("marketing", &["seo", "sem", "social media", "content marketing"]),
    ("design", &["photoshop", "illustrator", "figma", "sketch"]),
    ("gestion", &["management", "leadership", "organisation"]),
    ("communication", &["présentation", "rédaction", "négociation"]),
];

static BUILTIN: LazyLock<SkillDictionary> = LazyLock::new(|| SkillDictionary {
    families: BUILTIN_SYNONYMS
        .iter()
        .map(|(canonical, synonyms)| {
            (
                canonical.to_string(),
                synonyms.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect(),
});

/// Read-only mapping from canonical skill name to its synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDictionary {
    families: BTreeMap<String, Vec<String>>,
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl SkillDictionary {
    pub fn builtin() -> &'static SkillDictionary {
        &BUILTIN
    }

    /// Merge additional families; synonyms of an existing skill are appended.
    pub fn with_extra(&self, extra: &BTreeMap<String, Vec<String>>) -> SkillDictionary {
        let mut families = self.families.clone();

        for (canonical, synonyms) in extra {
            let entry = families.entry(canonical.trim().to_lowercase()).or_default();
            for synonym in synonyms {
                let synonym = synonym.trim().to_lowercase();
                if !synonym.is_empty() && !entry.contains(&synonym) {
                    entry.push(synonym);
                }
            }
        }

        SkillDictionary { families }
    }

    pub fn synonyms(&self, canonical: &str) -> Option<&[String]> {
        self.families.get(canonical).map(|s| s.as_slice())
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.families.contains_key(name)
    }

    pub fn canonical_skills(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(|k| k.as_str())
    }

    pub fn families(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.families.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_families() {
        let dictionary = SkillDictionary::builtin();
        assert_eq!(dictionary.len(), 13);
        assert!(dictionary.is_canonical("python"));
        assert!(!dictionary.is_canonical("django"));
        assert_eq!(
            dictionary.synonyms("git").unwrap(),
            ["github", "gitlab", "bitbucket"]
        );
    }

    #[test]
    fn test_with_extra_merges_and_adds() {
        let mut extra = BTreeMap::new();
        extra.insert("Python".to_string(), vec!["PyTorch".to_string(), "django".to_string()]);
        extra.insert("rust".to_string(), vec!["cargo".to_string(), "tokio".to_string()]);

        let dictionary = SkillDictionary::builtin().with_extra(&extra);

        assert_eq!(dictionary.len(), 14);
        let python = dictionary.synonyms("python").unwrap();
        assert!(python.contains(&"pytorch".to_string()));
        assert_eq!(python.iter().filter(|s| s.as_str() == "django").count(), 1);
        assert_eq!(dictionary.synonyms("rust").unwrap(), ["cargo", "tokio"]);

        // The shared built-in table is untouched
        assert!(!SkillDictionary::builtin().is_canonical("rust"));
    }
}
