use http::header::HeaderMap;
use http::Method;
use log::error;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::{VManageError, VManageResult};

/// Snapshot of a transport response, kept on every [`ApiResponse`] for
/// callers that need more than the normalized fields.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Method of the request that produced this response.
    pub method: Method,

    /// Final URL of the request, if known.
    pub url: Option<Url>,

    /// HTTP status code.
    pub status: u16,

    /// Response headers.
    pub headers: HeaderMap,

    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    pub fn new(method: Method, status: u16, body: impl Into<String>) -> Self {
        Self {
            method,
            url: None,
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Reads a reqwest response to completion.
    pub(crate) async fn from_reqwest(
        method: Method,
        response: reqwest::Response,
    ) -> VManageResult<Self> {
        let status = response.status().as_u16();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(Self {
            method,
            url: Some(url),
            status,
            headers,
            body,
        })
    }
}

/// Uniform outcome of a call against the controller.
///
/// `ok` is true only for status codes in the success table. `data` is never
/// null: an empty JSON object is the floor.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Whether the status code was a success code.
    pub ok: bool,

    /// HTTP status code.
    pub status_code: u16,

    /// Error message, or a description of why no data could be read.
    pub error: String,

    /// Fixed phrase for the status code, or the error details sent by the
    /// controller.
    pub reason: String,

    /// Payload: an object, an array, or a string depending on the envelope.
    pub data: Value,

    /// The raw response this result was built from.
    pub response: RawResponse,
}

impl ApiResponse {
    /// Returns true if the response failed or carries an error message.
    pub fn has_error(&self) -> bool {
        !self.ok || !self.error.is_empty()
    }

    /// Deserializes `data` into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> VManageResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Deserializes `data` as a list. The empty-object floor reads as an
    /// empty list.
    pub fn list_of<T: DeserializeOwned>(&self) -> VManageResult<Vec<T>> {
        match &self.data {
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            _ => self.data_as(),
        }
    }

    /// Reads a string field from an object payload.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

pub(crate) fn empty_data() -> Value {
    Value::Object(Map::new())
}

/// Checks the outcome of a write operation.
///
/// A response without an error is returned untouched. A failed response is
/// logged with its reason and then either returned as is or, when
/// `raise_on_error` is set, turned into [`VManageError::PostFailure`].
pub fn check_post_response(
    response: ApiResponse,
    raise_on_error: bool,
) -> VManageResult<ApiResponse> {
    if !response.has_error() {
        return Ok(response);
    }

    error!("Failure in POST operation: {}.", response.reason);

    if raise_on_error {
        return Err(VManageError::PostFailure(response.reason));
    }

    Ok(response)
}
