//! Type-safe wrappers around [`ResourceClient`](crate::http::ResourceClient).

pub mod analytics_client;
pub mod application_client;
pub mod conversation_client;
pub mod entity_client;
pub mod job_client;
pub mod profile_client;

pub use analytics_client::*;
pub use application_client::*;
pub use conversation_client::*;
pub use entity_client::*;
pub use job_client::*;
pub use profile_client::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;
    use crate::http::{ApiClient, ApiError, ResourceClient};
    use crate::model::{ApplicationCreate, JobSearch, MessageCreate};
    use mockito::Matcher;
    use std::sync::Arc;

    fn api(base_url: String) -> Arc<ApiClient> {
        Arc::new(
            ApiClient::new(&ApiSettings {
                base_url,
                token: Some("secret".to_string()),
                ..ApiSettings::default()
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn job_get_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/jobs/42")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"42","title":"Engineer"}"#)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        let job = jobs.get("42".to_string()).await.unwrap();

        assert_eq!(job.title, "Engineer");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn job_search_encodes_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "rust dev".into()),
                Matcher::UrlEncoded("location".into(), "Berlin".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"id":"1","title":"Rust dev"},{"id":"2","title":"Rust lead"}]"#)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        let found = jobs
            .search(&JobSearch {
                query: Some("rust dev".to_string()),
                location: Some("Berlin".to_string()),
                ..JobSearch::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn job_close_posts_action() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/jobs/7/close")
            .with_status(200)
            .with_body(r#"{"id":"7","title":"Closed role","status":"closed"}"#)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        let closed = jobs.close("7".to_string()).await.unwrap();

        assert_eq!(closed.status, crate::model::JobStatus::Closed);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn job_delete_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/jobs/7")
            .with_status(204)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        jobs.delete("7".to_string()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn job_delete_ignores_confirmation_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/jobs/7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"deleted":true}"#)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        jobs.delete("7".to_string()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn application_submit_and_list_for_job() {
        let mut server = mockito::Server::new_async().await;
        let submit = server
            .mock("POST", "/api/v1/applications")
            .match_body(Matcher::PartialJsonString(
                r#"{"job_id":"42","candidate_id":"c1"}"#.to_string(),
            ))
            .with_status(201)
            .with_body(r#"{"id":"a1","job_id":"42","candidate_id":"c1"}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/v1/applications")
            .match_query(Matcher::UrlEncoded("job_id".into(), "42".into()))
            .with_status(200)
            .with_body(r#"[{"id":"a1","job_id":"42","candidate_id":"c1"}]"#)
            .create_async()
            .await;

        let applications = ApplicationClient::new(ResourceClient::new(api(server.url())));
        let submitted = applications
            .submit(&ApplicationCreate {
                job_id: "42".to_string(),
                candidate_id: "c1".to_string(),
                cover_letter: None,
            })
            .await
            .unwrap();
        let for_job = applications.for_job("42").await.unwrap();

        assert_eq!(submitted.id, "a1");
        assert_eq!(for_job.len(), 1);
        submit.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn send_message_returns_the_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/conversations/c9/messages")
            .with_status(201)
            .with_body(r#"{"id":"m1","sender_id":"u1","body":"Hello"}"#)
            .create_async()
            .await;

        let conversations = ConversationClient::new(ResourceClient::new(api(server.url())));
        let message = conversations
            .send_message(
                "c9".to_string(),
                &MessageCreate {
                    sender_id: "u1".to_string(),
                    body: "Hello".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(message.body, "Hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_job_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/jobs/missing")
            .with_status(404)
            .with_body(r#"{"message":"no such job"}"#)
            .create_async()
            .await;

        let jobs = JobClient::new(ResourceClient::new(api(server.url())));
        let err = jobs.get("missing".to_string()).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn analytics_summary_tolerates_partial_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/analytics/co1")
            .with_status(200)
            .with_body(r#"{"id":"co1","total_jobs":3}"#)
            .create_async()
            .await;

        let analytics = AnalyticsClient::new(ResourceClient::new(api(server.url())));
        let summary = analytics.summary("co1".to_string()).await.unwrap();

        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.total_applications, 0);
    }
}
