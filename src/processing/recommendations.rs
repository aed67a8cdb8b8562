//! Profile improvement recommendations against a set of target offers

use crate::model::{CandidateProfile, JobOffer};
use crate::processing::completeness::{calculate_profile_completeness, CompletenessResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of missing skills suggested to the candidate.
const MAX_SKILL_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Skills,
    Personality,
    Preferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub demand: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<SkillDemand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecommendations {
    pub recommendations: Vec<ProfileRecommendation>,
    pub profile_completeness: CompletenessResult,
}

pub fn profile_recommendations(profile: &CandidateProfile, target_jobs: &[JobOffer]) -> ProfileRecommendations {
    let mut recommendations = Vec::new();

    let missing = missing_skills(profile, target_jobs);
    if !missing.is_empty() {
        recommendations.push(ProfileRecommendation {
            kind: RecommendationKind::Skills,
            priority: Priority::High,
            title: "Compétences très demandées".to_string(),
            description: "Ces compétences sont fréquemment demandées dans vos cibles".to_string(),
            suggestions: missing.into_iter().take(MAX_SKILL_SUGGESTIONS).collect(),
            action: None,
        });
    }

    if profile.personality().is_none() {
        recommendations.push(ProfileRecommendation {
            kind: RecommendationKind::Personality,
            priority: Priority::Medium,
            title: "Complétez votre profil psychologique".to_string(),
            description: "Un profil comportemental complet améliore significativement vos matches".to_string(),
            suggestions: Vec::new(),
            action: Some("Répondez au questionnaire psychologique".to_string()),
        });
    }

    if profile.preferred_locations().is_empty() || profile.preferred_sectors().is_empty() {
        recommendations.push(ProfileRecommendation {
            kind: RecommendationKind::Preferences,
            priority: Priority::Medium,
            title: "Précisez vos préférences".to_string(),
            description: "Des préférences claires permettent un matching plus précis".to_string(),
            suggestions: Vec::new(),
            action: Some("Complétez vos préférences de recherche".to_string()),
        });
    }

    ProfileRecommendations {
        recommendations,
        profile_completeness: calculate_profile_completeness(profile),
    }
}

/// Required skills the candidate lacks, most demanded first.
///
/// Demand is counted on the exact skill string; ties keep the order in which
/// skills first appear across the targets.
pub fn missing_skills(profile: &CandidateProfile, target_jobs: &[JobOffer]) -> Vec<SkillDemand> {
    let mut demand: Vec<SkillDemand> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for skill in target_jobs.iter().flat_map(|job| job.required_skills.iter()) {
        match index.get(skill.as_str()) {
            Some(&i) => demand[i].demand += 1,
            None => {
                index.insert(skill.as_str(), demand.len());
                demand.push(SkillDemand {
                    skill: skill.clone(),
                    demand: 1,
                });
            }
        }
    }

    let owned: HashSet<String> = profile
        .technical_skills()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    demand.sort_by(|a, b| b.demand.cmp(&a.demand));
    demand.retain(|d| !owned.contains(&d.skill.to_lowercase()));
    demand
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job(skills: &[&str]) -> JobOffer {
        JobOffer {
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn complete_profile() -> CandidateProfile {
        serde_json::from_value(json!({
            "skills": { "technical": ["Python"] },
            "preferences": { "sectors": ["tech"], "locations": ["Paris"] },
            "psychological_profile": { "work_style": "team" }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_skills_ranked_by_demand() {
        let profile = complete_profile();
        let targets = vec![
            job(&["docker", "python", "sql"]),
            job(&["sql", "git"]),
            job(&["sql", "git", "PYTHON"]),
        ];

        let missing = missing_skills(&profile, &targets);
        let names: Vec<&str> = missing.iter().map(|d| d.skill.as_str()).collect();
        assert_eq!(names, vec!["sql", "git", "docker"]);
        assert_eq!(missing[0].demand, 3);
        assert_eq!(missing[1].demand, 2);
    }

    #[test]
    fn test_skills_recommendation_capped_at_five() {
        let profile = complete_profile();
        let targets = vec![job(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"])];

        let report = profile_recommendations(&profile, &targets);
        assert_eq!(report.recommendations.len(), 1);
        let skills = &report.recommendations[0];
        assert_eq!(skills.kind, RecommendationKind::Skills);
        assert_eq!(skills.priority, Priority::High);
        assert_eq!(skills.suggestions.len(), 5);
        assert_eq!(skills.suggestions[0].skill, "a1");
    }

    #[test]
    fn test_no_targets_no_skills_entry() {
        let profile = CandidateProfile::default();
        let report = profile_recommendations(&profile, &[]);

        let kinds: Vec<RecommendationKind> = report.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecommendationKind::Personality, RecommendationKind::Preferences]);
        assert_eq!(report.profile_completeness.total_fields, 14);
    }

    #[test]
    fn test_all_skills_owned() {
        let profile = complete_profile();
        let report = profile_recommendations(&profile, &[job(&["python"])]);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_personality_entry_follows_presence() {
        let answered_nothing: CandidateProfile = serde_json::from_value(json!({
            "preferences": { "sectors": ["tech"], "locations": ["Paris"] },
            "psychological_profile": { "work_style": null, "communication_style": null }
        }))
        .unwrap();
        assert!(profile_recommendations(&answered_nothing, &[]).recommendations.is_empty());

        let empty_object: CandidateProfile = serde_json::from_value(json!({
            "preferences": { "sectors": ["tech"], "locations": ["Paris"] },
            "psychological_profile": {}
        }))
        .unwrap();
        let kinds: Vec<RecommendationKind> = profile_recommendations(&empty_object, &[])
            .recommendations
            .iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![RecommendationKind::Personality]);
    }

    #[test]
    fn test_serialized_shape() {
        let profile = CandidateProfile::default();
        let report = profile_recommendations(&profile, &[job(&["rust"])]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["recommendations"][0]["type"], "skills");
        assert_eq!(value["recommendations"][0]["suggestions"][0]["demand"], 1);
        assert_eq!(value["recommendations"][1]["type"], "personality");
        assert!(value["recommendations"][1].get("suggestions").is_none());
        assert_eq!(value["profile_completeness"]["percentage"], 0.0);
    }
}
