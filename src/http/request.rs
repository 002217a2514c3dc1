//! Request descriptions as plain data.
//!
//! [`ApiPath`] names a resource location relative to the API root and
//! [`ResourceRequest`] is the fully built call. Both can be inspected without touching
//! the network, which keeps URL construction testable on its own.

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// `{resource}[/{id}][/{action}]` plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    resource: String,
    id: Option<String>,
    action: Option<String>,
    query: Vec<(String, String)>,
}

impl ApiPath {
    pub fn resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: None,
            action: None,
            query: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends every `(key, value)` pair.
    pub fn queries(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Renders `/{prefix}/{version}/{resource}[/{id}][/{action}]`, segments URL-encoded.
    pub fn render(&self, prefix: &str, version: &str) -> String {
        let mut path = String::new();
        for segment in [Some(prefix), Some(version), Some(self.resource.as_str())]
            .into_iter()
            .chain([self.id.as_deref(), self.action.as_deref()])
            .flatten()
            .filter(|segment| !segment.is_empty())
        {
            path.push('/');
            path.push_str(&urlencoding::encode(segment.trim_matches('/')));
        }
        path
    }
}

/// A REST call described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub path: String,
    pub body: Option<Value>,
    pub query_params: Vec<(String, String)>,
}

impl ResourceRequest {
    /// The absolute URL including the encoded query string.
    pub fn url(&self) -> String {
        if self.query_params.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query_params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}
