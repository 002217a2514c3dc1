use crate::access::RouteGuard;
use crate::binding::Binding;
use crate::clients::{
    AnalyticsClient, ApplicationClient, CompanyClient, ConversationClient, JobClient,
    ProfileClient,
};
use crate::config::Settings;
use crate::framework::{StateStore, StoreClient, StoreError, SyncEntity};
use crate::http::{ApiClient, ApiError, ResourceClient};
use crate::model::{
    AnalyticsSummary, Application, CandidateProfile, Company, Conversation, Job,
};
use crate::prefs::{FileStorage, PreferenceFlag};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Everything wired up for one entity type.
pub struct EntitySync<T: SyncEntity, C> {
    /// Handle to the process-wide store for `T`.
    pub store: StoreClient<T>,
    /// Fetch-on-mount binding reading through `client`'s resource.
    pub binding: Binding<T>,
    /// Typed REST operations for `T`.
    pub client: C,
}

/// The runtime orchestrator for the job-board data layer.
///
/// `SyncSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping one store actor per entity type
/// - **Dependency Wiring**: Sharing one [`ApiClient`] between every resource client and binding
/// - **Session Helpers**: The route guard and the persisted sidebar preference
///
/// # Example
///
/// ```ignore
/// let system = SyncSystem::new(&settings)?;
///
/// let mut job = system.jobs.binding.mount("42".to_string());
/// job.settled().await;
/// println!("{:?}", job.view().await?);
///
/// // Handles keep their store alive; drop them before shutting down.
/// drop(job);
/// system.shutdown().await?;
/// ```
pub struct SyncSystem {
    pub api: Arc<ApiClient>,
    pub jobs: EntitySync<Job, JobClient>,
    pub companies: EntitySync<Company, CompanyClient>,
    pub candidates: EntitySync<CandidateProfile, ProfileClient>,
    pub applications: EntitySync<Application, ApplicationClient>,
    pub conversations: EntitySync<Conversation, ConversationClient>,
    pub analytics: EntitySync<AnalyticsSummary, AnalyticsClient>,
    pub guard: RouteGuard,
    pub sidebar: PreferenceFlag,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl SyncSystem {
    /// Builds the API client and spawns every store. Must be called inside a Tokio runtime.
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(&settings.api)?);
        let mailbox = settings.store.mailbox_size;
        let mut handles = Vec::new();

        let jobs = wire(&api, mailbox, &mut handles, JobClient::new);
        let companies = wire(&api, mailbox, &mut handles, CompanyClient::new);
        let candidates = wire(&api, mailbox, &mut handles, ProfileClient::new);
        let applications = wire(&api, mailbox, &mut handles, ApplicationClient::new);
        let conversations = wire(&api, mailbox, &mut handles, ConversationClient::new);
        let analytics = wire(&api, mailbox, &mut handles, AnalyticsClient::new);

        let storage = Arc::new(FileStorage::new(settings.prefs.path.clone()));

        info!(stores = handles.len(), base_url = %settings.api.base_url, "Sync system started");

        Ok(Self {
            api,
            jobs,
            companies,
            candidates,
            applications,
            conversations,
            analytics,
            guard: RouteGuard::new(&settings.guard),
            sidebar: PreferenceFlag::sidebar_collapsed(storage),
            handles,
        })
    }

    /// Empties every store, e.g. on sign-out. Returns the number of entries dropped.
    pub async fn clear_all(&self) -> Result<usize, StoreError> {
        Ok(self.jobs.store.clear_all().await?
            + self.companies.store.clear_all().await?
            + self.candidates.store.clear_all().await?
            + self.applications.store.clear_all().await?
            + self.conversations.store.clear_all().await?
            + self.analytics.store.clear_all().await?)
    }

    /// Gracefully shuts down every store.
    ///
    /// Dropping the system's store handles closes the mailboxes once no
    /// [`BindingHandle`](crate::binding::BindingHandle) or cloned client is left, and each
    /// store exits its loop. Waiting here does not finish while such handles are alive.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down sync system...");

        drop(self.jobs);
        drop(self.companies);
        drop(self.candidates);
        drop(self.applications);
        drop(self.conversations);
        drop(self.analytics);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Sync system shutdown complete.");
        Ok(())
    }
}

fn wire<T: SyncEntity, C>(
    api: &Arc<ApiClient>,
    mailbox: usize,
    handles: &mut Vec<JoinHandle<()>>,
    make_client: impl FnOnce(ResourceClient<T>) -> C,
) -> EntitySync<T, C> {
    let (store, client) = StateStore::<T>::new(mailbox);
    handles.push(tokio::spawn(store.run()));

    let resource = ResourceClient::<T>::new(api.clone());
    EntitySync {
        binding: Binding::new(client.clone(), resource.clone()),
        store: client,
        client: make_client(resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_and_shuts_down_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.prefs.path = dir.path().join("prefs.json");

        let system = SyncSystem::new(&settings).unwrap();
        assert_eq!(system.clear_all().await.unwrap(), 0);
        assert!(!system.sidebar.get().await);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "localhost:8080".to_string();
        assert!(matches!(
            SyncSystem::new(&settings),
            Err(ApiError::InvalidConfig(_))
        ));
    }
}
