//! Geographic proximity between candidate preferences and a job location

use crate::config::{LocationConfig, RegionGroup};

pub const UNKNOWN_LOCATION_SCORE: f64 = 0.5;
pub const REMOTE_SCORE: f64 = 1.0;
pub const SAME_PLACE_SCORE: f64 = 0.9;
pub const SAME_REGION_SCORE: f64 = 0.7;
pub const DISTANT_SCORE: f64 = 0.3;

const REMOTE_MARKERS: &[&str] = &["télétravail", "remote"];

/// Which rule decided a location score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMatch {
    Unknown,
    Remote,
    SamePlace,
    SameRegion,
    Distant,
}

impl LocationMatch {
    pub fn score(&self) -> f64 {
        match self {
            LocationMatch::Unknown => UNKNOWN_LOCATION_SCORE,
            LocationMatch::Remote => REMOTE_SCORE,
            LocationMatch::SamePlace => SAME_PLACE_SCORE,
            LocationMatch::SameRegion => SAME_REGION_SCORE,
            LocationMatch::Distant => DISTANT_SCORE,
        }
    }
}

pub struct LocationScorer {
    regions: Vec<RegionGroup>,
}

impl Default for LocationScorer {
    fn default() -> Self {
        Self::new(&LocationConfig::default())
    }
}

impl LocationScorer {
    pub fn new(config: &LocationConfig) -> Self {
        let regions = config
            .regions
            .iter()
            .map(|region| RegionGroup {
                name: region.name.clone(),
                tokens: region.tokens.iter().map(|t| t.to_lowercase()).collect(),
            })
            .collect();

        Self { regions }
    }

    pub fn score<S: AsRef<str>>(&self, candidate_locations: &[S], job_location: &str, remote_possible: bool) -> f64 {
        self.classify(candidate_locations, job_location, remote_possible).score()
    }

    /// Apply the rules in priority order; the first one that holds wins.
    pub fn classify<S: AsRef<str>>(
        &self,
        candidate_locations: &[S],
        job_location: &str,
        remote_possible: bool,
    ) -> LocationMatch {
        if candidate_locations.is_empty() || job_location.is_empty() {
            return LocationMatch::Unknown;
        }

        let candidates: Vec<String> = candidate_locations
            .iter()
            .map(|l| l.as_ref().to_lowercase())
            .collect();
        let job = job_location.to_lowercase();

        if remote_possible
            && candidates
                .iter()
                .any(|l| REMOTE_MARKERS.iter().any(|marker| l.contains(marker)))
        {
            return LocationMatch::Remote;
        }

        if candidates
            .iter()
            .any(|l| job.contains(l.as_str()) || l.contains(job.as_str()))
        {
            return LocationMatch::SamePlace;
        }

        if self.regions.iter().any(|region| {
            let mentions = |place: &str| region.tokens.iter().any(|t| place.contains(t.as_str()));
            candidates.iter().any(|l| mentions(l.as_str())) && mentions(job.as_str())
        }) {
            return LocationMatch::SameRegion;
        }

        LocationMatch::Distant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_are_neutral() {
        let scorer = LocationScorer::default();
        let none: [&str; 0] = [];
        assert_eq!(scorer.score(&none, "Paris", true), 0.5);
        assert_eq!(scorer.score(&["Paris"], "", false), 0.5);
    }

    #[test]
    fn test_remote_override() {
        let scorer = LocationScorer::default();
        assert_eq!(scorer.score(&["Brest", "Télétravail"], "Lille", true), 1.0);
        assert_eq!(scorer.score(&["REMOTE only"], "Lyon", true), 1.0);
        // Without remote availability the preference is just another place
        assert_eq!(scorer.score(&["Télétravail"], "Lyon", false), 0.3);
    }

    #[test]
    fn test_substring_either_way() {
        let scorer = LocationScorer::default();
        assert_eq!(scorer.score(&["paris"], "Paris 15e", false), 0.9);
        assert_eq!(scorer.score(&["Lyon Part-Dieu"], "LYON", false), 0.9);
    }

    #[test]
    fn test_region_match() {
        let scorer = LocationScorer::default();
        assert_eq!(scorer.score(&["Boulogne (92)"], "Paris", false), 0.7);
        assert_eq!(scorer.score(&["Gironde"], "Bordeaux", false), 0.7);
        assert_eq!(
            scorer.classify(&["Villeurbanne 69100"], "Lyon", false),
            LocationMatch::SameRegion
        );
    }

    #[test]
    fn test_default_low_score() {
        let scorer = LocationScorer::default();
        assert_eq!(scorer.score(&["Brest"], "Strasbourg", false), 0.3);
    }

    #[test]
    fn test_specificity_ordering() {
        let scorer = LocationScorer::default();
        let remote = scorer.score(&["remote"], "Paris", true);
        let place = scorer.score(&["Paris"], "Paris", true);
        let region = scorer.score(&["Versailles 78"], "Paris", true);
        let distant = scorer.score(&["Brest"], "Paris", true);

        assert!(remote >= place && place >= region && region >= distant);
        assert_eq!([remote, place, region, distant], [1.0, 0.9, 0.7, 0.3]);
    }

    #[test]
    fn test_custom_region_table() {
        let config = LocationConfig {
            regions: vec![RegionGroup {
                name: "nantes".to_string(),
                tokens: vec!["Nantes".to_string(), "44".to_string()],
            }],
        };
        let scorer = LocationScorer::new(&config);
        assert_eq!(scorer.score(&["Saint-Nazaire 44600"], "Nantes", false), 0.7);
        assert_eq!(scorer.score(&["Gironde"], "Bordeaux", false), 0.3);
        assert_eq!(scorer.classify(&["NANTES centre"], "Rezé 44400", false), LocationMatch::SameRegion);
    }
}
