//! Configuration management for the matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Weights applied to the six sub-scores. They must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub technical_skills_weight: f64,
    pub personality_weight: f64,
    pub location_weight: f64,
    pub soft_skills_weight: f64,
    pub preferences_weight: f64,
    pub education_weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Extra synonym families merged into the built-in dictionary.
    #[serde(default)]
    pub extra_synonyms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub regions: Vec<RegionGroup>,
}

/// A group of city, department and region tokens considered one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub name: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            technical_skills_weight: 0.35,
            personality_weight: 0.25,
            location_weight: 0.15,
            soft_skills_weight: 0.10,
            preferences_weight: 0.08,
            education_weight: 0.07,
        }
    }
}

impl ScoringConfig {
    pub fn total(&self) -> f64 {
        self.technical_skills_weight
            + self.personality_weight
            + self.location_weight
            + self.soft_skills_weight
            + self.preferences_weight
            + self.education_weight
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("technical_skills_weight", self.technical_skills_weight),
            ("personality_weight", self.personality_weight),
            ("location_weight", self.location_weight),
            ("soft_skills_weight", self.soft_skills_weight),
            ("preferences_weight", self.preferences_weight),
            ("education_weight", self.education_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "Weight {} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(MatcherError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.4}",
                total
            )));
        }

        Ok(())
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        let group = |name: &str, tokens: &[&str]| RegionGroup {
            name: name.to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        };

        Self {
            regions: vec![
                group(
                    "paris",
                    &["paris", "ile-de-france", "75", "77", "78", "91", "92", "93", "94", "95"],
                ),
                group("lyon", &["lyon", "rhône", "69", "auvergne"]),
                group("marseille", &["marseille", "bouches-du-rhône", "13", "paca"]),
                group("toulouse", &["toulouse", "haute-garonne", "31", "occitanie"]),
                group("lille", &["lille", "nord", "59", "hauts-de-france"]),
                group("bordeaux", &["bordeaux", "gironde", "33", "nouvelle-aquitaine"]),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the configuration, creating a default file on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("alternance-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        for region in &self.location.regions {
            if region.tokens.iter().any(|t| t.trim().is_empty()) {
                return Err(MatcherError::Configuration(format!(
                    "Region '{}' contains an empty token",
                    region.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let scoring = ScoringConfig::default();
        assert!((scoring.total() - 1.0).abs() < 1e-12);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let scoring = ScoringConfig {
            technical_skills_weight: 0.5,
            ..ScoringConfig::default()
        };
        assert!(scoring.validate().is_err());

        let negative = ScoringConfig {
            technical_skills_weight: -0.35,
            personality_weight: 0.95,
            ..ScoringConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_default_regions() {
        let location = LocationConfig::default();
        assert_eq!(location.regions.len(), 6);
        assert!(location.regions.iter().any(|r| r.name == "bordeaux"));
    }

    #[test]
    fn test_empty_region_token_rejected() {
        let mut config = Config::default();
        config.location.regions.push(RegionGroup {
            name: "nantes".to_string(),
            tokens: vec!["nantes".to_string(), " ".to_string()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_regions() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.location.regions, config.location.regions);
        assert_eq!(parsed.scoring, config.scoring);
    }
}
