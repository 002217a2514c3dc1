use crate::clients::entity_client::EntityClient;
use crate::http::{ApiError, ResourceClient};
use crate::model::{Job, JobCreate, JobSearch, JobUpdate};
use tracing::{debug, info, instrument};

/// Client for job postings.
#[derive(Clone)]
pub struct JobClient {
    inner: ResourceClient<Job>,
}

impl JobClient {
    pub fn new(inner: ResourceClient<Job>) -> Self {
        Self { inner }
    }

    /// `GET /jobs?q=..&location=..`
    #[instrument(skip(self))]
    pub async fn search(&self, search: &JobSearch) -> Result<Vec<Job>, ApiError> {
        let jobs = self.inner.list(search.to_query()).await?;
        debug!(count = jobs.len(), "Search returned");
        Ok(jobs)
    }

    #[instrument(skip(self, job))]
    pub async fn create(&self, job: &JobCreate) -> Result<Job, ApiError> {
        debug!(?job, "Posting job");
        let created = self.inner.create(job).await?;
        info!(job_id = %created.id, "Job posted");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: String, update: &JobUpdate) -> Result<Job, ApiError> {
        self.inner.update(&id, update).await
    }

    /// `POST /jobs/{id}/close`
    #[instrument(skip(self))]
    pub async fn close(&self, id: String) -> Result<Job, ApiError> {
        self.inner.action::<(), Job>(&id, "close", None).await
    }
}

impl EntityClient<Job> for JobClient {
    fn inner(&self) -> &ResourceClient<Job> {
        &self.inner
    }
}
