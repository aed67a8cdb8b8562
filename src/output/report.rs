//! Report structures wrapping engine results for presentation

use crate::model::MatchOutcome;
use crate::processing::recommendations::ProfileRecommendations;
use crate::processing::{BatchReport, SkillsAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one CLI command, ready to be formatted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub matcher_version: String,
    /// Files the report was computed from
    pub sources: Vec<String>,
}

/// Serialized untagged so the JSON output keeps the record layout of each result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportBody {
    Match(MatchOutcome),
    Batch(BatchReport),
    Skills(SkillsAnalysis),
    Recommendations(ProfileRecommendations),
}

impl ReportBody {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportBody::Match(_) => "match",
            ReportBody::Batch(_) => "batch",
            ReportBody::Skills(_) => "skills",
            ReportBody::Recommendations(_) => "recommendations",
        }
    }
}

impl Report {
    pub fn new(body: ReportBody, sources: Vec<String>, processing_time_ms: u64) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                sources,
            },
            body,
        }
    }
}
