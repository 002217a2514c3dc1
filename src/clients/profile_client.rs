use crate::clients::entity_client::EntityClient;
use crate::http::{ApiError, ResourceClient};
use crate::model::{CandidateProfile, Company, Job, ProfileUpdate};
use tracing::instrument;

/// Client for candidate profiles.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<CandidateProfile>,
}

impl ProfileClient {
    pub fn new(inner: ResourceClient<CandidateProfile>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: String,
        update: &ProfileUpdate,
    ) -> Result<CandidateProfile, ApiError> {
        self.inner.update(&id, update).await
    }
}

impl EntityClient<CandidateProfile> for ProfileClient {
    fn inner(&self) -> &ResourceClient<CandidateProfile> {
        &self.inner
    }
}

/// Client for company profiles.
#[derive(Clone)]
pub struct CompanyClient {
    inner: ResourceClient<Company>,
}

impl CompanyClient {
    pub fn new(inner: ResourceClient<Company>) -> Self {
        Self { inner }
    }

    /// `GET /companies/{id}/jobs`
    #[instrument(skip(self))]
    pub async fn jobs(&self, id: String) -> Result<Vec<Job>, ApiError> {
        self.inner.related(&id, "jobs").await
    }
}

impl EntityClient<Company> for CompanyClient {
    fn inner(&self) -> &ResourceClient<Company> {
        &self.inner
    }
}
