use std::time::Duration;

use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde_json::Value;

use crate::constants::STANDARD_JSON_HEADERS;
use crate::{ApiResponse, VManageError, VManageResult};

/// Per-call overrides for headers and timeout.
///
/// Unset headers fall back to the standard JSON set; an unset timeout falls
/// back to the client's default.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: Option<HeaderMap>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header. Supplying any header replaces the whole default set.
    pub fn header(mut self, name: &str, value: &str) -> VManageResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| VManageError::InvalidArgument(format!("Invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| VManageError::InvalidArgument(format!("Invalid header value: {e}")))?;
        self.headers.get_or_insert_with(HeaderMap::new).insert(name, value);
        Ok(self)
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Headers to send: the caller's, or the standard JSON set.
    pub fn effective_headers(&self) -> HeaderMap {
        match &self.headers {
            Some(headers) => headers.clone(),
            None => standard_headers(),
        }
    }

    /// Timeout to apply: the caller's, or `fallback`.
    pub fn timeout_or(&self, fallback: Duration) -> Duration {
        self.timeout.unwrap_or(fallback)
    }
}

/// `Connection: keep-alive` and `Content-Type: application/json`.
pub fn standard_headers() -> HeaderMap {
    STANDARD_JSON_HEADERS
        .iter()
        .map(|&(name, value)| (HeaderName::from_static(name), HeaderValue::from_static(value)))
        .collect()
}

/// The per-verb call surface the template layer and the importer are written
/// against.
///
/// Paths are relative to the controller's dataservice root, e.g.
/// `/template/feature`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issues a request and normalizes the response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> VManageResult<ApiResponse>;

    async fn get(&self, path: &str) -> VManageResult<ApiResponse> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    async fn post(&self, path: &str, body: Value) -> VManageResult<ApiResponse> {
        self.request(Method::POST, path, Some(body), RequestOptions::default())
            .await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> VManageResult<ApiResponse> {
        self.request(Method::PUT, path, body, RequestOptions::default())
            .await
    }

    async fn delete(&self, path: &str, body: Option<Value>) -> VManageResult<ApiResponse> {
        self.request(Method::DELETE, path, body, RequestOptions::default())
            .await
    }
}
