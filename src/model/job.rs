use crate::http::{require_fields, ShapeOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub posted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
    Draft,
}

impl Job {
    /// A minimal open posting; the remaining fields are placeholders.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company_id: None,
            location: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            description: None,
            skills: Vec::new(),
            status: JobStatus::Open,
            posted_at: None,
        }
    }
}

fn check_job(value: &Value) -> ShapeOutcome {
    require_fields(value, &["id", "title"])
}

define_resource!(Job, "jobs", Some(check_job));

/// Payload for posting a new job.
#[derive(Debug, Clone, Serialize)]
pub struct JobCreate {
    pub title: String,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Search filters, sent as query parameters.
#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    pub query: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub page: Option<u32>,
}

impl JobSearch {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.query {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location".to_string(), location.clone()));
        }
        if let Some(kind) = self.employment_type {
            let kind = serde_json::to_value(kind)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string));
            if let Some(kind) = kind {
                pairs.push(("employment_type".to_string(), kind));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs
    }
}
