//! Job offer records

use super::profile::{null_as_default, EducationLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobOffer {
    /// Opaque identifier echoed back by batch scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_type: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remote_possible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_level: Option<EducationLevel>,
}

impl JobOffer {
    /// Title and description joined the way the personality heuristics read them.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_missing_fields() {
        let job: JobOffer = serde_json::from_value(json!({ "title": "Développeur" })).unwrap();
        assert_eq!(job.title, "Développeur");
        assert!(job.required_skills.is_empty());
        assert!(!job.remote_possible);
        assert!(job.id.is_none());
        assert_eq!(job.full_text(), "Développeur ");
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let job: JobOffer = serde_json::from_value(json!({
            "title": "Dev",
            "required_skills": null,
            "location": null,
            "contract_type": null,
            "remote_possible": null
        }))
        .unwrap();

        assert!(job.required_skills.is_empty());
        assert!(job.location.is_empty());
        assert!(job.contract_type.is_empty());
        assert!(!job.remote_possible);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let result: Result<JobOffer, _> = serde_json::from_value(json!({ "required_skills": "python" }));
        assert!(result.is_err());
    }
}
