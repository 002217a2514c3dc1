use crate::http::{require_fields, ShapeOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Reviewing,
    Interview,
    Offered,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Whether the application can still move forward.
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }
}

fn check_application(value: &Value) -> ShapeOutcome {
    require_fields(value, &["id", "job_id", "candidate_id"])
}

define_resource!(Application, "applications", Some(check_application));

/// Payload for applying to a job.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCreate {
    pub job_id: String,
    pub candidate_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}
