use crate::clients::entity_client::EntityClient;
use crate::http::{ApiError, ResourceClient};
use crate::model::{Application, ApplicationCreate};
use tracing::{info, instrument};

/// Client for job applications.
#[derive(Clone)]
pub struct ApplicationClient {
    inner: ResourceClient<Application>,
}

impl ApplicationClient {
    pub fn new(inner: ResourceClient<Application>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, application), fields(job_id = %application.job_id))]
    pub async fn submit(&self, application: &ApplicationCreate) -> Result<Application, ApiError> {
        let submitted = self.inner.create(application).await?;
        info!(application_id = %submitted.id, "Application submitted");
        Ok(submitted)
    }

    /// `POST /applications/{id}/withdraw`
    #[instrument(skip(self))]
    pub async fn withdraw(&self, id: String) -> Result<Application, ApiError> {
        self.inner.action::<(), Application>(&id, "withdraw", None).await
    }

    /// `GET /applications?job_id=..`
    #[instrument(skip(self))]
    pub async fn for_job(&self, job_id: &str) -> Result<Vec<Application>, ApiError> {
        self.inner
            .list(vec![("job_id".to_string(), job_id.to_string())])
            .await
    }
}

impl EntityClient<Application> for ApplicationClient {
    fn inner(&self) -> &ResourceClient<Application> {
        &self.inner
    }
}
