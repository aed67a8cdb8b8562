//! Match aggregation: sub-scores, weighted total, reasons and recommendations

use crate::config::{Config, ScoringConfig};
use crate::error::{MatcherError, Result};
use crate::model::result::round_to;
use crate::model::{
    CandidateProfile, CompatibilityLevel, DetailedScores, EducationLevel, FailedMatch, JobOffer,
    MatchOutcome, ScoreResult, SubScore,
};
use crate::processing::location::LocationScorer;
use crate::processing::personality::PersonalityAnalyzer;
use crate::processing::recommendations::{self, ProfileRecommendations};
use crate::processing::skill_dictionary::SkillDictionary;
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::text_processor::TextProcessor;
use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::time::Instant;

const PREFERENCES_BASE: f64 = 0.5;
const CONTRACT_BONUS: f64 = 0.3;
const SECTOR_BONUS: f64 = 0.2;

const EDUCATION_DEFAULT: f64 = 0.7;
const EDUCATION_MET: f64 = 1.0;
const EDUCATION_ONE_BELOW: f64 = 0.8;

pub const REASON_TECHNICAL: &str = "Excellente correspondance des compétences techniques";
pub const REASON_PERSONALITY: &str = "Profil comportemental très compatible";
pub const REASON_LOCATION: &str = "Localisation idéale";
pub const REASON_SOFT_SKILLS: &str = "Bonnes compétences transversales";
pub const REASON_GENERIC: &str = "Profil compatible avec les exigences du poste";

pub const ADVICE_TECHNICAL: &str =
    "Développez vos compétences techniques pour mieux correspondre aux exigences";
pub const ADVICE_PERSONALITY: &str =
    "Mettez en avant les aspects de votre personnalité qui correspondent au poste";
pub const ADVICE_LOCATION: &str = "Considérez élargir votre zone de recherche géographique";

/// Result of scoring one profile against many offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub matches: Vec<MatchOutcome>,
    pub total_analyzed: usize,
    pub best_match_score: f64,
}

impl BatchReport {
    fn from_outcomes(mut matches: Vec<MatchOutcome>) -> Self {
        // Stable: equal scores keep the order of the offers.
        matches.sort_by(|a, b| {
            b.total_score()
                .partial_cmp(&a.total_score())
                .unwrap_or(Ordering::Equal)
        });

        let best_match_score = matches.first().map(|m| m.total_score()).unwrap_or(0.0);

        Self {
            total_analyzed: matches.len(),
            best_match_score,
            matches,
        }
    }

    pub fn truncate(&mut self, top: usize) {
        self.matches.truncate(top);
    }
}

/// Skills found in a free text together with its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    pub extracted_skills: Vec<String>,
    pub processed_text: String,
    pub skills_count: usize,
}

#[derive(Debug, Clone)]
pub struct EngineStats {
    pub canonical_skills: usize,
    pub skill_patterns: usize,
    pub regions: usize,
}

/// Stateless scoring engine; every table is built once and only read afterwards.
pub struct MatchEngine {
    skill_matcher: SkillMatcher,
    location_scorer: LocationScorer,
    text_processor: TextProcessor,
    scoring: ScoringConfig,
    regions: usize,
}

impl MatchEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let dictionary = SkillDictionary::builtin().with_extra(&config.skills.extra_synonyms);
        let skill_matcher = SkillMatcher::new(dictionary)?;

        Ok(Self {
            skill_matcher,
            location_scorer: LocationScorer::new(&config.location),
            text_processor: TextProcessor::new(),
            scoring: config.scoring,
            regions: config.location.regions.len(),
        })
    }

    /// Score a profile against an offer, or report why it could not be scored.
    pub fn score(&self, profile: &CandidateProfile, job: &JobOffer) -> Result<ScoreResult> {
        let scores = self.compute_scores(profile, job);
        Self::validate_scores(&scores)?;

        let (total_score, compatibility_level) = rate(&scores, &self.scoring);

        Ok(ScoreResult {
            total_score,
            detailed_scores: scores.rounded(),
            compatibility_level,
            match_reasons: match_reasons(&scores),
            recommendations: improvement_recommendations(&scores),
            analysis_timestamp: Utc::now(),
            job_id: None,
        })
    }

    /// The six unrounded sub-scores on a 0-100 scale.
    pub fn compute_scores(&self, profile: &CandidateProfile, job: &JobOffer) -> DetailedScores {
        let technical = self
            .skill_matcher
            .calculate_skills_similarity(profile.technical_skills(), &job.required_skills);

        let personality = PersonalityAnalyzer::analyze(profile.personality(), &job.full_text());

        let location = self.location_scorer.score(
            profile.preferred_locations(),
            &job.location,
            job.remote_possible,
        );

        let job_skills = self.skill_matcher.extract_skills_from_text(&job.description);
        let soft = self
            .skill_matcher
            .calculate_skills_similarity(profile.soft_skills(), &job_skills);

        DetailedScores {
            technical_skills: technical * 100.0,
            personality: personality * 100.0,
            location: location * 100.0,
            soft_skills: soft * 100.0,
            preferences: preferences_fit(profile, job) * 100.0,
            education: education_fit(profile.education_level(), job.required_level.as_ref()) * 100.0,
        }
    }

    /// Typed boundary: any failure becomes a degraded `Erreur` outcome.
    pub fn calculate_match(&self, profile: &CandidateProfile, job: &JobOffer) -> MatchOutcome {
        Self::recover(self.score(profile, job))
    }

    /// JSON boundary: a missing record or a malformed field also degrades.
    pub fn calculate_match_value(&self, profile: Option<&Value>, job: Option<&Value>) -> MatchOutcome {
        Self::recover(self.try_match_value(profile, job))
    }

    fn try_match_value(&self, profile: Option<&Value>, job: Option<&Value>) -> Result<ScoreResult> {
        let profile = profile.ok_or_else(|| MatcherError::MissingRecord("user_profile".to_string()))?;
        let job = job.ok_or_else(|| MatcherError::MissingRecord("job_offer".to_string()))?;

        let profile = CandidateProfile::deserialize(profile)?;
        let job = JobOffer::deserialize(job)?;

        self.score(&profile, &job)
    }

    fn recover(result: Result<ScoreResult>) -> MatchOutcome {
        match result {
            Ok(score) => MatchOutcome::Scored(score),
            Err(e) => {
                log::error!("Match computation failed: {}", e);
                MatchOutcome::Failed(FailedMatch::new(e.to_string()))
            }
        }
    }

    /// Score every offer in parallel, then rank by descending total score.
    pub fn calculate_batch(&self, profile: &CandidateProfile, jobs: &[JobOffer]) -> BatchReport {
        self.calculate_batch_with_progress(profile, jobs, || {})
    }

    pub fn calculate_batch_with_progress<F>(
        &self,
        profile: &CandidateProfile,
        jobs: &[JobOffer],
        on_scored: F,
    ) -> BatchReport
    where
        F: Fn() + Sync,
    {
        let start_time = Instant::now();

        let outcomes: Vec<MatchOutcome> = jobs
            .par_iter()
            .map(|job| {
                let outcome = self.calculate_match(profile, job).with_job_id(job.id.clone());
                on_scored();
                outcome
            })
            .collect();

        log::info!(
            "Scored {} offers in {}ms",
            outcomes.len(),
            start_time.elapsed().as_millis()
        );

        BatchReport::from_outcomes(outcomes)
    }

    /// Batch over raw records; a malformed offer only degrades its own entry.
    pub fn calculate_batch_value(&self, profile: Option<&Value>, jobs: &[Value]) -> BatchReport {
        self.calculate_batch_value_with_progress(profile, jobs, || {})
    }

    pub fn calculate_batch_value_with_progress<F>(
        &self,
        profile: Option<&Value>,
        jobs: &[Value],
        on_scored: F,
    ) -> BatchReport
    where
        F: Fn() + Sync,
    {
        let profile = match profile.map(|p| CandidateProfile::deserialize(p)) {
            Some(Ok(profile)) => Some(profile),
            Some(Err(e)) => {
                log::warn!("Invalid candidate profile: {}", e);
                None
            }
            None => None,
        };

        let outcomes: Vec<MatchOutcome> = jobs
            .par_iter()
            .map(|raw| {
                let job_id = raw.get("id").cloned();
                let outcome = match &profile {
                    Some(profile) => match JobOffer::deserialize(raw) {
                        Ok(job) => self.calculate_match(profile, &job),
                        Err(e) => Self::recover(Err(e.into())),
                    },
                    None => Self::recover(Err(MatcherError::MissingRecord(
                        "valid user_profile".to_string(),
                    ))),
                };
                on_scored();
                outcome.with_job_id(job_id)
            })
            .collect();

        BatchReport::from_outcomes(outcomes)
    }

    /// Extract dictionary skills from a text and normalize it.
    pub fn analyze_skills(&self, text: &str) -> SkillsAnalysis {
        let extracted_skills = self.skill_matcher.extract_skills_from_text(text);
        let processed_text = self.text_processor.preprocess(text);

        SkillsAnalysis {
            skills_count: extracted_skills.len(),
            extracted_skills,
            processed_text,
        }
    }

    pub fn profile_recommendations(
        &self,
        profile: &CandidateProfile,
        target_jobs: &[JobOffer],
    ) -> ProfileRecommendations {
        recommendations::profile_recommendations(profile, target_jobs)
    }

    pub fn get_stats(&self) -> EngineStats {
        EngineStats {
            canonical_skills: self.skill_matcher.dictionary().len(),
            skill_patterns: self.skill_matcher.pattern_count(),
            regions: self.regions,
        }
    }

    fn validate_scores(scores: &DetailedScores) -> Result<()> {
        for (sub_score, value) in scores.iter() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(MatcherError::InvalidScore {
                    name: sub_score.key().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Weighted total rounded to two decimals; the tier is read from the rounded value.
fn rate(scores: &DetailedScores, scoring: &ScoringConfig) -> (f64, CompatibilityLevel) {
    let total = round_to(scores.weighted_total(scoring), 2);
    (total, CompatibilityLevel::from_score(total))
}

/// 0.5 base, plus bonuses for an accepted contract type and a preferred sector.
pub fn preferences_fit(profile: &CandidateProfile, job: &JobOffer) -> f64 {
    let mut fit = PREFERENCES_BASE;

    if profile
        .accepted_contract_types()
        .iter()
        .any(|c| *c == job.contract_type)
    {
        fit += CONTRACT_BONUS;
    }

    let sector = job.sector.to_lowercase();
    if profile
        .preferred_sectors()
        .iter()
        .any(|s| sector.contains(&s.to_lowercase()))
    {
        fit += SECTOR_BONUS;
    }

    fit.min(1.0)
}

/// Compare education levels on the bac..bac+8 scale; unknown levels keep the default.
pub fn education_fit(user_level: Option<&EducationLevel>, required_level: Option<&EducationLevel>) -> f64 {
    let (user, required) = match (
        user_level.and_then(|l| l.ordinal()),
        required_level.and_then(|l| l.ordinal()),
    ) {
        (Some(user), Some(required)) => (i32::from(user), i32::from(required)),
        _ => return EDUCATION_DEFAULT,
    };

    if user >= required {
        EDUCATION_MET
    } else if user >= required - 1 {
        EDUCATION_ONE_BELOW
    } else {
        EDUCATION_DEFAULT
    }
}

pub fn match_reasons(scores: &DetailedScores) -> Vec<String> {
    let rules = [
        (SubScore::TechnicalSkills, 70.0, REASON_TECHNICAL),
        (SubScore::Personality, 75.0, REASON_PERSONALITY),
        (SubScore::Location, 80.0, REASON_LOCATION),
        (SubScore::SoftSkills, 60.0, REASON_SOFT_SKILLS),
    ];

    let mut reasons: Vec<String> = rules
        .iter()
        .filter(|(sub_score, threshold, _)| scores.get(*sub_score) > *threshold)
        .map(|(_, _, reason)| reason.to_string())
        .collect();

    if reasons.is_empty() {
        reasons.push(REASON_GENERIC.to_string());
    }

    reasons
}

pub fn improvement_recommendations(scores: &DetailedScores) -> Vec<String> {
    let rules = [
        (SubScore::TechnicalSkills, 60.0, ADVICE_TECHNICAL),
        (SubScore::Personality, 50.0, ADVICE_PERSONALITY),
        (SubScore::Location, 40.0, ADVICE_LOCATION),
    ];

    rules
        .iter()
        .filter(|(sub_score, threshold, _)| scores.get(*sub_score) < *threshold)
        .map(|(_, _, advice)| advice.to_string())
        .collect()
}
