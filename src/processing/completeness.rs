//! Profile completeness: how many of the scored profile fields are filled in

use crate::model::result::round_to;
use crate::model::CandidateProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessResult {
    pub percentage: f64,
    pub completed_fields: usize,
    pub total_fields: usize,
    pub missing_fields: usize,
}

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Count the 14 field checks across personal data, skills, education,
/// preferences and the psychological profile.
pub fn calculate_profile_completeness(profile: &CandidateProfile) -> CompletenessResult {
    let skills = profile.skills.as_ref();
    let education = profile.education.as_ref();
    let preferences = profile.preferences.as_ref();

    let checks = [
        // Personal information
        filled(profile.first_name.as_deref()),
        filled(profile.last_name.as_deref()),
        filled(profile.email.as_deref()),
        filled(profile.phone.as_deref()),
        filled(profile.city.as_deref()),
        // Skills
        skills.is_some_and(|s| !s.technical.is_empty()),
        skills.is_some_and(|s| !s.soft.is_empty()),
        // Education
        filled(education.and_then(|e| e.current_level.as_ref()).map(|l| l.as_str())),
        filled(education.and_then(|e| e.institution.as_deref())),
        filled(education.and_then(|e| e.field.as_deref())),
        // Preferences
        preferences.is_some_and(|p| !p.sectors.is_empty()),
        preferences.is_some_and(|p| !p.locations.is_empty()),
        preferences.is_some_and(|p| !p.contract_types.is_empty()),
        // Psychological profile
        profile.personality().is_some(),
    ];

    let total_fields = checks.len();
    let completed_fields = checks.iter().filter(|&&done| done).count();
    let percentage = if total_fields > 0 {
        round_to(completed_fields as f64 / total_fields as f64 * 100.0, 1)
    } else {
        0.0
    };

    CompletenessResult {
        percentage,
        completed_fields,
        total_fields,
        missing_fields: total_fields - completed_fields,
    }
}
