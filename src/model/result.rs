//! Score records produced by the matching engine

use crate::config::ScoringConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The six independently computed components of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScore {
    TechnicalSkills,
    Personality,
    Location,
    SoftSkills,
    Preferences,
    Education,
}

impl SubScore {
    pub const ALL: [SubScore; 6] = [
        SubScore::TechnicalSkills,
        SubScore::Personality,
        SubScore::Location,
        SubScore::SoftSkills,
        SubScore::Preferences,
        SubScore::Education,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SubScore::TechnicalSkills => "technical_skills",
            SubScore::Personality => "personality",
            SubScore::Location => "location",
            SubScore::SoftSkills => "soft_skills",
            SubScore::Preferences => "preferences",
            SubScore::Education => "education",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubScore::TechnicalSkills => "Compétences techniques",
            SubScore::Personality => "Personnalité",
            SubScore::Location => "Localisation",
            SubScore::SoftSkills => "Compétences transversales",
            SubScore::Preferences => "Préférences",
            SubScore::Education => "Formation",
        }
    }

    pub fn weight(&self, scoring: &ScoringConfig) -> f64 {
        match self {
            SubScore::TechnicalSkills => scoring.technical_skills_weight,
            SubScore::Personality => scoring.personality_weight,
            SubScore::Location => scoring.location_weight,
            SubScore::SoftSkills => scoring.soft_skills_weight,
            SubScore::Preferences => scoring.preferences_weight,
            SubScore::Education => scoring.education_weight,
        }
    }
}

/// Sub-scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailedScores {
    pub technical_skills: f64,
    pub personality: f64,
    pub location: f64,
    pub soft_skills: f64,
    pub preferences: f64,
    pub education: f64,
}

impl DetailedScores {
    pub fn get(&self, sub_score: SubScore) -> f64 {
        match sub_score {
            SubScore::TechnicalSkills => self.technical_skills,
            SubScore::Personality => self.personality,
            SubScore::Location => self.location,
            SubScore::SoftSkills => self.soft_skills,
            SubScore::Preferences => self.preferences,
            SubScore::Education => self.education,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubScore, f64)> + '_ {
        SubScore::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn weighted_total(&self, scoring: &ScoringConfig) -> f64 {
        self.iter().map(|(s, value)| value * s.weight(scoring)).sum()
    }

    pub fn rounded(&self) -> Self {
        Self {
            technical_skills: round_to(self.technical_skills, 2),
            personality: round_to(self.personality, 2),
            location: round_to(self.location, 2),
            soft_skills: round_to(self.soft_skills, 2),
            preferences: round_to(self.preferences, 2),
            education: round_to(self.education, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityLevel {
    Excellent,
    #[serde(rename = "Très bon")]
    TresBon,
    Bon,
    Moyen,
    Faible,
    Erreur,
}

impl CompatibilityLevel {
    /// Tier for a total score; each threshold is inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            CompatibilityLevel::Excellent
        } else if score >= 70.0 {
            CompatibilityLevel::TresBon
        } else if score >= 55.0 {
            CompatibilityLevel::Bon
        } else if score >= 40.0 {
            CompatibilityLevel::Moyen
        } else {
            CompatibilityLevel::Faible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::Excellent => "Excellent",
            CompatibilityLevel::TresBon => "Très bon",
            CompatibilityLevel::Bon => "Bon",
            CompatibilityLevel::Moyen => "Moyen",
            CompatibilityLevel::Faible => "Faible",
            CompatibilityLevel::Erreur => "Erreur",
        }
    }
}

impl fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub detailed_scores: DetailedScores,
    pub compatibility_level: CompatibilityLevel,
    pub match_reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub analysis_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Value>,
}

/// Degraded record returned when a match could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedMatch {
    pub total_score: f64,
    pub detailed_scores: BTreeMap<String, f64>,
    pub compatibility_level: CompatibilityLevel,
    pub match_reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Value>,
}

pub const RETRY_RECOMMENDATION: &str = "Erreur dans l'analyse, veuillez réessayer";

impl FailedMatch {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            total_score: 0.0,
            detailed_scores: BTreeMap::new(),
            compatibility_level: CompatibilityLevel::Erreur,
            match_reasons: Vec::new(),
            recommendations: vec![RETRY_RECOMMENDATION.to_string()],
            error: error.into(),
            job_id: None,
        }
    }
}

/// Outcome of a single match: either a valid score or a degraded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchOutcome {
    Scored(ScoreResult),
    Failed(FailedMatch),
}

impl MatchOutcome {
    pub fn total_score(&self) -> f64 {
        match self {
            MatchOutcome::Scored(result) => result.total_score,
            MatchOutcome::Failed(failed) => failed.total_score,
        }
    }

    pub fn compatibility_level(&self) -> CompatibilityLevel {
        match self {
            MatchOutcome::Scored(result) => result.compatibility_level,
            MatchOutcome::Failed(failed) => failed.compatibility_level,
        }
    }

    pub fn match_reasons(&self) -> &[String] {
        match self {
            MatchOutcome::Scored(result) => &result.match_reasons,
            MatchOutcome::Failed(failed) => &failed.match_reasons,
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            MatchOutcome::Scored(result) => &result.recommendations,
            MatchOutcome::Failed(failed) => &failed.recommendations,
        }
    }

    pub fn job_id(&self) -> Option<&Value> {
        match self {
            MatchOutcome::Scored(result) => result.job_id.as_ref(),
            MatchOutcome::Failed(failed) => failed.job_id.as_ref(),
        }
    }

    pub fn with_job_id(mut self, id: Option<Value>) -> Self {
        match &mut self {
            MatchOutcome::Scored(result) => result.job_id = id,
            MatchOutcome::Failed(failed) => failed.job_id = id,
        }
        self
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, MatchOutcome::Failed(_))
    }

    pub fn scored(&self) -> Option<&ScoreResult> {
        match self {
            MatchOutcome::Scored(result) => Some(result),
            MatchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MatchOutcome::Scored(_) => None,
            MatchOutcome::Failed(failed) => Some(&failed.error),
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
