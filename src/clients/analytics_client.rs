use crate::clients::entity_client::EntityClient;
use crate::http::{ApiError, ResourceClient};
use crate::model::AnalyticsSummary;
use tracing::instrument;

/// Read-only client for dashboard figures.
#[derive(Clone)]
pub struct AnalyticsClient {
    inner: ResourceClient<AnalyticsSummary>,
}

impl AnalyticsClient {
    pub fn new(inner: ResourceClient<AnalyticsSummary>) -> Self {
        Self { inner }
    }

    /// `GET /analytics/{owner_id}`
    #[instrument(skip(self))]
    pub async fn summary(&self, owner_id: String) -> Result<AnalyticsSummary, ApiError> {
        self.inner.fetch(&owner_id).await
    }
}

impl EntityClient<AnalyticsSummary> for AnalyticsClient {
    fn inner(&self) -> &ResourceClient<AnalyticsSummary> {
        &self.inner
    }
}
