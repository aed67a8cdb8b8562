//! Heuristic fit between a personality profile and the text of a job offer

use crate::model::{CommunicationStyle, Motivation, PersonalityProfile, WorkStyle};

/// Score of a profile we know nothing about.
pub const NEUTRAL_FIT: f64 = 0.5;

const TEAM_KEYWORDS: &[&str] = &["équipe", "collabor", "groupe"];
const INDEPENDENT_KEYWORDS: &[&str] = &["autonome", "indépendant"];

const LEARNING_KEYWORDS: &[&str] = &["formation", "apprentissage", "développement"];
const IMPACT_KEYWORDS: &[&str] = &["impact", "innovation", "changement"];
const GROWTH_KEYWORDS: &[&str] = &["évolution", "carrière", "promotion"];

const DIRECT_KEYWORDS: &[&str] = &["commercial", "vente", "négociation"];
const ANALYTICAL_KEYWORDS: &[&str] = &["analyse", "recherche", "étude"];

const WORK_STYLE_MATCH: f64 = 0.8;
const WORK_STYLE_WEIGHT: f64 = 1.0;
const MOTIVATION_MATCH: f64 = 0.6;
const MOTIVATION_WEIGHT: f64 = 0.5;
const COMMUNICATION_MATCH: f64 = 0.7;
const COMMUNICATION_WEIGHT: f64 = 1.0;

/// Running total of the heuristics; each one adds weight whether it matched or not.
#[derive(Debug, Default, Clone, Copy)]
struct FitAccumulator {
    score: f64,
    weight: f64,
}

impl FitAccumulator {
    fn add(&mut self, matched: bool, score: f64, weight: f64) {
        if matched {
            self.score += score;
        }
        self.weight += weight;
    }

    fn ratio(&self) -> f64 {
        if self.weight > 0.0 {
            self.score / self.weight
        } else {
            NEUTRAL_FIT
        }
    }
}

pub struct PersonalityAnalyzer;

impl PersonalityAnalyzer {
    /// Compatibility in [0, 1]; a missing profile or empty text gives the neutral 0.5.
    /// A present profile without answers still weighs its work and communication styles.
    pub fn analyze(profile: Option<&PersonalityProfile>, job_text: &str) -> f64 {
        let profile = match profile {
            Some(profile) if !job_text.is_empty() => profile,
            _ => return NEUTRAL_FIT,
        };

        let text = job_text.to_lowercase();
        let mut fit = FitAccumulator::default();

        let work_style_keywords: &[&str] = match &profile.work_style {
            Some(WorkStyle::Team) => TEAM_KEYWORDS,
            Some(WorkStyle::Independent) => INDEPENDENT_KEYWORDS,
            _ => &[],
        };
        fit.add(
            contains_any(&text, work_style_keywords),
            WORK_STYLE_MATCH,
            WORK_STYLE_WEIGHT,
        );

        for motivation in &profile.motivation {
            fit.add(
                contains_any(&text, Self::motivation_keywords(motivation)),
                MOTIVATION_MATCH,
                MOTIVATION_WEIGHT,
            );
        }

        let communication_keywords: &[&str] = match &profile.communication_style {
            Some(CommunicationStyle::Direct) => DIRECT_KEYWORDS,
            Some(CommunicationStyle::Analytical) => ANALYTICAL_KEYWORDS,
            _ => &[],
        };
        fit.add(
            contains_any(&text, communication_keywords),
            COMMUNICATION_MATCH,
            COMMUNICATION_WEIGHT,
        );

        fit.ratio()
    }

    fn motivation_keywords(motivation: &Motivation) -> &'static [&'static str] {
        match motivation {
            Motivation::Learning => LEARNING_KEYWORDS,
            Motivation::Impact => IMPACT_KEYWORDS,
            Motivation::Growth => GROWTH_KEYWORDS,
            Motivation::Other(_) => &[],
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
