use crate::http::{require_fields, ShapeOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An employer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website: None,
            industry: None,
            size: None,
            description: None,
            logo_url: None,
        }
    }
}

fn check_company(value: &Value) -> ShapeOutcome {
    require_fields(value, &["id", "name"])
}

define_resource!(Company, "companies", Some(check_company));
