//! Candidate profile records

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    /// Absent when missing, null, or an empty object or list.
    #[serde(default, deserialize_with = "present_or_none", skip_serializing_if = "Option::is_none")]
    pub psychological_profile: Option<PersonalityProfile>,
    /// Free-form experience block, carried through but not scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_level: Option<EducationLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sectors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalityProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_style: Option<WorkStyle>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub motivation: Vec<Motivation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<CommunicationStyle>,
}

/// Declares a string-backed enum whose unknown values are kept verbatim.
macro_rules! open_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.trim().to_lowercase().as_str() {
                    $($text => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum!(WorkStyle {
    Team => "team",
    Independent => "independent",
});

open_enum!(Motivation {
    Learning => "learning",
    Impact => "impact",
    Growth => "growth",
});

open_enum!(CommunicationStyle {
    Direct => "direct",
    Analytical => "analytical",
});

open_enum!(EducationLevel {
    Bac => "bac",
    Bac1 => "bac+1",
    Bac2 => "bac+2",
    Bac3 => "bac+3",
    Bac4 => "bac+4",
    Bac5 => "bac+5",
    Bac8 => "bac+8",
});

impl EducationLevel {
    /// Position on the French post-baccalaureate scale, `None` for unknown codes.
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            EducationLevel::Bac => Some(1),
            EducationLevel::Bac1 => Some(2),
            EducationLevel::Bac2 => Some(3),
            EducationLevel::Bac3 => Some(4),
            EducationLevel::Bac4 => Some(5),
            EducationLevel::Bac5 => Some(6),
            EducationLevel::Bac8 => Some(7),
            EducationLevel::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Reads an explicit null the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Keeps the profile only when the raw value is truthy; a present object
/// with no recognised answers is still a profile.
fn present_or_none<'de, D>(deserializer: D) -> Result<Option<PersonalityProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(value) if !is_blank(&value) => value,
        _ => return Ok(None),
    };
    PersonalityProfile::deserialize(value)
        .map(Some)
        .map_err(de::Error::custom)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Accepts a single value, a sequence, or null.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

impl CandidateProfile {
    pub fn technical_skills(&self) -> &[String] {
        self.skills.as_ref().map(|s| s.technical.as_slice()).unwrap_or_default()
    }

    pub fn soft_skills(&self) -> &[String] {
        self.skills.as_ref().map(|s| s.soft.as_slice()).unwrap_or_default()
    }

    pub fn preferred_locations(&self) -> &[String] {
        self.preferences.as_ref().map(|p| p.locations.as_slice()).unwrap_or_default()
    }

    pub fn preferred_sectors(&self) -> &[String] {
        self.preferences.as_ref().map(|p| p.sectors.as_slice()).unwrap_or_default()
    }

    pub fn accepted_contract_types(&self) -> &[String] {
        self.preferences.as_ref().map(|p| p.contract_types.as_slice()).unwrap_or_default()
    }

    pub fn education_level(&self) -> Option<&EducationLevel> {
        self.education.as_ref().and_then(|e| e.current_level.as_ref())
    }

    pub fn personality(&self) -> Option<&PersonalityProfile> {
        self.psychological_profile.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_motivation_scalar_is_coerced() {
        let profile: PersonalityProfile = serde_json::from_value(json!({
            "work_style": "team",
            "motivation": "learning"
        }))
        .unwrap();

        assert_eq!(profile.motivation, vec![Motivation::Learning]);
        assert_eq!(profile.work_style, Some(WorkStyle::Team));
    }

    #[test]
    fn test_motivation_sequence_and_unknown_values() {
        let profile: PersonalityProfile = serde_json::from_value(json!({
            "motivation": ["growth", "salary"],
            "communication_style": "diplomatic"
        }))
        .unwrap();

        assert_eq!(
            profile.motivation,
            vec![Motivation::Growth, Motivation::Other("salary".to_string())]
        );
        assert_eq!(
            profile.communication_style,
            Some(CommunicationStyle::Other("diplomatic".to_string()))
        );
    }

    #[test]
    fn test_education_level_ordinals() {
        assert_eq!(EducationLevel::from("bac").ordinal(), Some(1));
        assert_eq!(EducationLevel::from("BAC+5").ordinal(), Some(6));
        assert_eq!(EducationLevel::from("bac+8").ordinal(), Some(7));
        assert_eq!(EducationLevel::from("master").ordinal(), None);
    }

    #[test]
    fn test_camel_case_personal_fields() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "firstName": "Camille",
            "lastName": "Durand",
            "skills": { "technical": ["python"] }
        }))
        .unwrap();

        assert_eq!(profile.first_name.as_deref(), Some("Camille"));
        assert_eq!(profile.technical_skills(), ["python".to_string()]);
        assert!(profile.soft_skills().is_empty());
        assert!(profile.personality().is_none());
    }

    #[test]
    fn test_empty_personality_is_absent() {
        for raw in [json!({}), json!(null), json!([]), json!("")] {
            let profile: CandidateProfile =
                serde_json::from_value(json!({ "psychological_profile": raw.clone() })).unwrap();
            assert!(profile.personality().is_none(), "{raw} should be absent");
        }
    }

    #[test]
    fn test_personality_without_answers_is_present() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "psychological_profile": { "motivation": [] }
        }))
        .unwrap();
        assert!(profile.personality().is_some());

        let profile: CandidateProfile = serde_json::from_value(json!({
            "psychological_profile": { "work_style": null, "communication_style": null }
        }))
        .unwrap();
        let personality = profile.personality().unwrap();
        assert!(personality.work_style.is_none());
        assert!(personality.motivation.is_empty());
    }

    #[test]
    fn test_null_lists_default_to_empty() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "skills": { "technical": ["python"], "soft": null },
            "preferences": { "locations": null, "sectors": null, "contract_types": null }
        }))
        .unwrap();

        assert_eq!(profile.technical_skills(), ["python".to_string()]);
        assert!(profile.soft_skills().is_empty());
        assert!(profile.preferred_locations().is_empty());
        assert!(profile.accepted_contract_types().is_empty());
    }
}
