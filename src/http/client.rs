//! The REST client shared by every resource.
//!
//! `ApiClient` turns an [`ApiPath`] into a [`ResourceRequest`], executes it with
//! `reqwest`, applies the optional [`ShapeCheck`] and decodes the JSON body.
//! There is no retry or backoff: a failed call is reported once, to the caller.

use crate::config::ApiSettings;
use crate::http::error::ApiError;
use crate::http::request::{ApiPath, HttpMethod, ResourceRequest};
use crate::http::validation::{ShapeCheck, ShapeOutcome, ValidationPolicy};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-call options.
#[derive(Debug, Clone)]
pub struct CallConfig {
    /// Attach the configured bearer token.
    pub with_credentials: bool,
    pub headers: Vec<(String, String)>,
    /// Overrides the client's validation policy for this call.
    pub validation: Option<ValidationPolicy>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            with_credentials: true,
            headers: Vec::new(),
            validation: None,
        }
    }
}

impl CallConfig {
    pub fn without_credentials(mut self) -> Self {
        self.with_credentials = false;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = Some(policy);
        self
    }
}

/// Versioned JSON client for the job-board backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    prefix: String,
    version: String,
    token: Option<String>,
    validation: ValidationPolicy,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "base_url must be http(s): {}",
                settings.base_url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            prefix: settings.prefix.clone(),
            version: settings.version.clone(),
            token: settings.token.clone(),
            validation: settings.validation,
        })
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        self.validation
    }

    /// Builds the request for `method` on `path` without sending it.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &ApiPath,
        body: Option<&B>,
    ) -> Result<ResourceRequest, ApiError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(ResourceRequest {
            method,
            path: format!("{}{}", self.base_url, path.render(&self.prefix, &self.version)),
            body,
            query_params: path.query_params().to_vec(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        check: Option<ShapeCheck>,
        config: &CallConfig,
    ) -> Result<T, ApiError> {
        let request = self.build::<Value>(HttpMethod::Get, path, None)?;
        self.send(request, check, config).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: Option<&B>,
        check: Option<ShapeCheck>,
        config: &CallConfig,
    ) -> Result<T, ApiError> {
        let request = self.build(HttpMethod::Post, path, body)?;
        self.send(request, check, config).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: Option<&B>,
        check: Option<ShapeCheck>,
        config: &CallConfig,
    ) -> Result<T, ApiError> {
        let request = self.build(HttpMethod::Patch, path, body)?;
        self.send(request, check, config).await
    }

    /// Deletes `path`. An empty response body decodes as JSON `null`, so `T = ()` works.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        check: Option<ShapeCheck>,
        config: &CallConfig,
    ) -> Result<T, ApiError> {
        let request = self.build::<Value>(HttpMethod::Delete, path, None)?;
        self.send(request, check, config).await
    }

    /// Executes a built request and decodes the response.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ResourceRequest,
        check: Option<ShapeCheck>,
        config: &CallConfig,
    ) -> Result<T, ApiError> {
        let url = request.url();
        debug!(method = ?request.method, %url, "Sending request");

        let mut builder = self.http.request(request.method.into(), &url);
        if config.with_credentials {
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token);
            }
        }
        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &request.path, &text);
            warn!(%url, status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }

        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        if let Some(check) = check {
            if let ShapeOutcome::Invalid(reason) = check(&value) {
                match config.validation.unwrap_or(self.validation) {
                    ValidationPolicy::Enforce => {
                        warn!(%url, %reason, "Response rejected by shape check");
                        return Err(ApiError::Validation(reason));
                    }
                    ValidationPolicy::Warn => {
                        warn!(%url, %reason, "Response failed shape check, continuing");
                    }
                }
            }
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn build_get_request() {
        let req = client("http://localhost:8080/")
            .build::<Value>(HttpMethod::Get, &ApiPath::resource("jobs").id("42"), None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/v1/jobs/42");
        assert!(req.body.is_none());
        assert!(req.query_params.is_empty());
    }

    #[test]
    fn build_post_request_carries_body_and_query() {
        let path = ApiPath::resource("applications").query("notify", true);
        let req = client("http://localhost:8080")
            .build(HttpMethod::Post, &path, Some(&json!({"job_id": "42"})))
            .unwrap();
        assert_eq!(req.body, Some(json!({"job_id": "42"})));
        assert_eq!(req.url(), "http://localhost:8080/api/v1/applications?notify=true");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ApiClient::new(&ApiSettings {
            base_url: "ftp://example.com".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn call_config_defaults_include_credentials() {
        let config = CallConfig::default();
        assert!(config.with_credentials);
        assert!(!config.without_credentials().with_credentials);
    }
}
