use jobboard_sync::access::{GuardDecision, Session};
use jobboard_sync::clients::EntityClient;
use jobboard_sync::config::Settings;
use jobboard_sync::framework::LoadingState;
use jobboard_sync::http::{ApiError, ValidationPolicy};
use jobboard_sync::lifecycle::SyncSystem;
use jobboard_sync::model::JobSearch;

fn settings(base_url: String, prefs_dir: &tempfile::TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url;
    settings.prefs.path = prefs_dir.path().join("prefs.json");
    settings
}

/// Full end-to-end test: real stores, real HTTP against a local mock backend.
#[tokio::test]
async fn test_job_view_loads_from_backend() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/jobs/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"42","title":"Engineer"}"#)
        .expect(1)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let system = SyncSystem::new(&settings(server.url(), &dir)).unwrap();

    let mut first = system.jobs.binding.mount("42".to_string());
    let mut second = system.jobs.binding.mount("42".to_string());
    first.settled().await;
    second.settled().await;

    let view = first.view().await.unwrap();
    assert!(!view.is_loading);
    assert_eq!(view.loading_state, LoadingState::Loaded);
    assert_eq!(view.entity.unwrap().title, "Engineer");
    assert_eq!(view.error, None);

    // both mounts were served by one request
    mock.assert_async().await;

    drop(first);
    drop(second);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_backend_error_lands_in_entry() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs/42")
        .with_status(503)
        .with_body(r#"{"error":"maintenance"}"#)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let system = SyncSystem::new(&settings(server.url(), &dir)).unwrap();

    let mut handle = system.jobs.binding.mount("42".to_string());
    handle.settled().await;

    let entry = system.jobs.store.snapshot("42".to_string()).await.unwrap();
    assert_eq!(entry.loading_state, LoadingState::Loaded);
    assert_eq!(entry.data, None);
    assert_eq!(entry.errors.as_deref(), Some("HTTP 503: maintenance"));

    drop(handle);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_validation_policy_enforce_vs_warn() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs/7")
        .with_status(200)
        .with_body(r#"{"id":"7"}"#)
        .expect(2)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();

    let system = SyncSystem::new(&settings(server.url(), &dir)).unwrap();
    let err = system.jobs.client.get("7".to_string()).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)), "got {err:?}");
    system.shutdown().await.unwrap();

    let mut lenient = settings(server.url(), &dir);
    lenient.api.validation = ValidationPolicy::Warn;
    let system = SyncSystem::new(&lenient).unwrap();
    let job = system.jobs.client.get("7".to_string()).await.unwrap();
    assert_eq!(job.id, "7");
    assert_eq!(job.title, "");
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_search_and_shared_store_clear() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs")
        .match_query(mockito::Matcher::UrlEncoded("q".into(), "rust".into()))
        .with_status(200)
        .with_body(r#"[{"id":"1","title":"Rust dev"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/companies/co1")
        .with_status(200)
        .with_body(r#"{"id":"co1","name":"Acme"}"#)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let system = SyncSystem::new(&settings(server.url(), &dir)).unwrap();

    let found = system
        .jobs
        .client
        .search(&JobSearch {
            query: Some("rust".to_string()),
            ..JobSearch::default()
        })
        .await
        .unwrap();
    assert_eq!(found[0].title, "Rust dev");

    let mut company = system.companies.binding.mount("co1".to_string());
    company.settled().await;
    assert_eq!(company.view().await.unwrap().entity.unwrap().name, "Acme");
    drop(company);

    // sign-out empties every store
    assert_eq!(system.clear_all().await.unwrap(), 1);
    let view = system.companies.binding.view("co1".to_string()).await.unwrap();
    assert_eq!(view.loading_state, LoadingState::Init);
    assert_eq!(view.entity, None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_session_helpers() {
    let dir = tempfile::tempdir().unwrap();
    let system = SyncSystem::new(&settings("http://localhost:8080".to_string(), &dir)).unwrap();

    let candidate = Session::from_cookie_header("access_token=t1; user_role=candidate");
    assert_eq!(
        system.guard.evaluate("/company/jobs", candidate.as_ref()),
        GuardDecision::RedirectHome("/".to_string())
    );
    assert_eq!(
        system.guard.evaluate("/candidate/profile", None),
        GuardDecision::RedirectSignIn("/sign-in".to_string())
    );

    let mut changes = system.sidebar.subscribe();
    assert!(system.sidebar.toggle().await.unwrap());
    assert!(changes.recv().await.unwrap().value);

    system.shutdown().await.unwrap();
}
