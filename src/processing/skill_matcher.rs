//! Skill extraction from free text and synonym-aware set similarity

use crate::error::{MatcherError, Result};
use crate::processing::skill_dictionary::SkillDictionary;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashSet};

/// Skill matcher backed by a synonym dictionary
pub struct SkillMatcher {
    dictionary: SkillDictionary,
    automaton: AhoCorasick,
    canonical: Vec<String>,
    pattern_owner: Vec<usize>,
}

impl SkillMatcher {
    pub fn new(dictionary: SkillDictionary) -> Result<Self> {
        let mut canonical = Vec::with_capacity(dictionary.len());
        let mut patterns = Vec::new();
        let mut pattern_owner = Vec::new();

        for (index, (skill, synonyms)) in dictionary.families().enumerate() {
            canonical.push(skill.to_string());
            patterns.push(skill.to_string());
            pattern_owner.push(index);
            for synonym in synonyms {
                patterns.push(synonym.clone());
                pattern_owner.push(index);
            }
        }

        // Standard semantics are required for overlapping search, so every
        // occurrence of every name is reported, like independent substring checks.
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| MatcherError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            dictionary,
            automaton,
            canonical,
            pattern_owner,
        })
    }

    /// Canonical skills whose name or a synonym occurs anywhere in the text.
    ///
    /// Matching is plain substring search without word boundaries, so
    /// "javascript" is also found inside "javascripting".
    pub fn extract_skills_from_text(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        let found: BTreeSet<usize> = self
            .automaton
            .find_overlapping_iter(&lowered)
            .map(|m| self.pattern_owner[m.pattern().as_usize()])
            .collect();

        found.into_iter().map(|i| self.canonical[i].clone()).collect()
    }

    /// Jaccard similarity of the two skill sets after synonym expansion.
    pub fn calculate_skills_similarity<A, B>(&self, first: &[A], second: &[B]) -> f64
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        if first.is_empty() || second.is_empty() {
            return 0.0;
        }

        let first_expanded = self.expand(first);
        let second_expanded = self.expand(second);

        let intersection = first_expanded.intersection(&second_expanded).count();
        let union = first_expanded.union(&second_expanded).count();

        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }

    /// Lowercased skills plus the synonyms of every canonical one.
    pub fn expand<S: AsRef<str>>(&self, skills: &[S]) -> HashSet<String> {
        let mut expanded = HashSet::new();

        for skill in skills {
            let lowered = skill.as_ref().to_lowercase();
            if let Some(synonyms) = self.dictionary.synonyms(&lowered) {
                expanded.extend(synonyms.iter().cloned());
            }
            expanded.insert(lowered);
        }

        expanded
    }

    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_owner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(SkillDictionary::default()).unwrap()
    }

    #[test]
    fn test_extract_by_name_and_synonym() {
        let matcher = matcher();
        let skills = matcher.extract_skills_from_text("Stack: React, Django et PostgreSQL. Travail sous Git.");

        assert!(skills.contains(&"javascript".to_string()));
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"sql".to_string()));
        assert!(skills.contains(&"git".to_string()));
        assert!(!skills.contains(&"php".to_string()));
    }

    #[test]
    fn test_extract_deduplicates() {
        let matcher = matcher();
        let skills = matcher.extract_skills_from_text("python python django flask numpy");
        assert_eq!(skills, vec!["python".to_string()]);
    }

    #[test]
    fn test_extract_is_substring_based() {
        let matcher = matcher();
        // "java" hides inside "javascript", "less" inside "regardless"
        let skills = matcher.extract_skills_from_text("javascript");
        assert!(skills.contains(&"java".to_string()));
        assert!(skills.contains(&"javascript".to_string()));

        let skills = matcher.extract_skills_from_text("regardless");
        assert_eq!(skills, vec!["html".to_string()]);
    }

    #[test]
    fn test_extract_accented_synonyms() {
        let matcher = matcher();
        let skills = matcher.extract_skills_from_text("Excellente RÉDACTION et sens de la Négociation");
        assert_eq!(skills, vec!["communication".to_string()]);
    }

    #[test]
    fn test_extract_empty_text() {
        let matcher = matcher();
        assert!(matcher.extract_skills_from_text("").is_empty());
    }

    #[test]
    fn test_similarity_properties() {
        let matcher = matcher();
        let a = ["Python", "Git"];
        let b = ["django", "github", "docker"];

        let ab = matcher.calculate_skills_similarity(&a, &b);
        let ba = matcher.calculate_skills_similarity(&b, &a);
        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 1.0);

        assert_eq!(matcher.calculate_skills_similarity(&a, &a), 1.0);

        let empty: [&str; 0] = [];
        assert_eq!(matcher.calculate_skills_similarity(&empty, &b), 0.0);
        assert_eq!(matcher.calculate_skills_similarity(&a, &empty), 0.0);
    }

    #[test]
    fn test_similarity_uses_expansion() {
        let matcher = matcher();
        // {python, django, flask, fastapi, pandas, numpy} vs {django}
        let score = matcher.calculate_skills_similarity(&["python"], &["django"]);
        assert!((score - 1.0 / 6.0).abs() < 1e-12);

        // Expansion is one-directional: a synonym does not pull in its family
        assert_eq!(matcher.calculate_skills_similarity(&["django"], &["flask"]), 0.0);
    }

    #[test]
    fn test_expand_lowercases() {
        let matcher = matcher();
        let expanded = matcher.expand(&["Docker", "Rust"]);
        assert!(expanded.contains("docker"));
        assert!(expanded.contains("kubernetes"));
        assert!(expanded.contains("rust"));
        assert_eq!(expanded.len(), 4);
    }
}
