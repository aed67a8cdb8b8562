//! Records exchanged with the matching engine

pub mod job;
pub mod profile;
pub mod result;

pub use job::JobOffer;
pub use profile::{
    CandidateProfile, CommunicationStyle, Education, EducationLevel, Motivation,
    PersonalityProfile, Preferences, Skills, WorkStyle,
};
pub use result::{
    CompatibilityLevel, DetailedScores, FailedMatch, MatchOutcome, ScoreResult, SubScore,
};
