use crate::http::{require_fields, ShapeOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message thread between candidates and companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub body: String,
    #[serde(default)]
    pub sent_at: Option<String>,
}

fn check_conversation(value: &Value) -> ShapeOutcome {
    require_fields(value, &["id"])
}

define_resource!(Conversation, "conversations", Some(check_conversation));

#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub sender_id: String,
    pub body: String,
}
