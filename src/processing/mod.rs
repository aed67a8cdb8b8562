//! Scoring components and the engine that combines them

pub mod completeness;
pub mod engine;
pub mod location;
pub mod personality;
pub mod recommendations;
pub mod skill_dictionary;
pub mod skill_matcher;
pub mod text_processor;

pub use engine::{BatchReport, EngineStats, MatchEngine, SkillsAnalysis};
