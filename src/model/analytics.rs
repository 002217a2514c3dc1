use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dashboard figures for a company or admin, keyed by owner id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub id: String,
    #[serde(default)]
    pub total_jobs: u32,
    #[serde(default)]
    pub total_applications: u32,
    #[serde(default)]
    pub applications_by_status: HashMap<String, u32>,
    #[serde(default)]
    pub views_last_30_days: u32,
}

// Dashboards tolerate partial payloads, so no shape check.
define_resource!(AnalyticsSummary, "analytics", None);
