use crate::clients::entity_client::EntityClient;
use crate::http::{ApiError, ResourceClient};
use crate::model::{Conversation, Message, MessageCreate};
use tracing::instrument;

/// Client for candidate/company messaging.
#[derive(Clone)]
pub struct ConversationClient {
    inner: ResourceClient<Conversation>,
}

impl ConversationClient {
    pub fn new(inner: ResourceClient<Conversation>) -> Self {
        Self { inner }
    }

    /// `POST /conversations/{id}/messages`
    #[instrument(skip(self, message))]
    pub async fn send_message(&self, id: String, message: &MessageCreate) -> Result<Message, ApiError> {
        self.inner.action(&id, "messages", Some(message)).await
    }
}

impl EntityClient<Conversation> for ConversationClient {
    fn inner(&self) -> &ResourceClient<Conversation> {
        &self.inner
    }
}
