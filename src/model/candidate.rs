use crate::http::{require_fields, ShapeOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A job seeker's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<u8>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub open_to_work: bool,
}

fn check_profile(value: &Value) -> ShapeOutcome {
    require_fields(value, &["id", "full_name"])
}

define_resource!(CandidateProfile, "candidates", Some(check_profile));

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_to_work: Option<bool>,
}
