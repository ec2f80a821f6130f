//! Classification of raw controller responses into [`ApiResponse`] values.
//!
//! The controller wraps successful GET payloads inconsistently: the useful
//! value sits under `data`, `config` or `templateDefinition` depending on the
//! endpoint. Error responses carry `{"error": {"details", "message"}}`.

use http::Method;
use serde_json::Value;

use crate::constants::{is_error_code, is_success_code, reason_phrase, NO_DATA_RECEIVED};
use crate::models::api_response::empty_data;
use crate::{ApiResponse, RawResponse, VManageError, VManageResult};

const DATA_KEY: &str = "data";
const CONFIG_KEY: &str = "config";
const TEMPLATE_DEFINITION_KEY: &str = "templateDefinition";

/// The envelope a successful GET payload was found in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    Data(Value),
    Config(Value),
    TemplateDefinition(Value),
    /// None of the envelope keys holds a non-empty value.
    Empty,
}

impl ResponseEnvelope {
    /// Picks the first non-empty value among `data`, `config` and
    /// `templateDefinition`, in that order.
    pub fn decode(body: &Value) -> Self {
        let Value::Object(map) = body else {
            return Self::Empty;
        };

        if let Some(value) = map.get(DATA_KEY).filter(|v| !is_empty_value(v)) {
            return Self::Data(value.clone());
        }
        if let Some(value) = map.get(CONFIG_KEY).filter(|v| !is_empty_value(v)) {
            return Self::Config(value.clone());
        }
        if let Some(value) = map.get(TEMPLATE_DEFINITION_KEY).filter(|v| !is_empty_value(v)) {
            return Self::TemplateDefinition(value.clone());
        }

        Self::Empty
    }

    /// Returns true if any envelope key is present, empty or not.
    pub fn has_envelope_key(body: &Value) -> bool {
        body.as_object().is_some_and(|map| {
            [DATA_KEY, CONFIG_KEY, TEMPLATE_DEFINITION_KEY]
                .iter()
                .any(|key| map.contains_key(*key))
        })
    }

    /// Unwraps the payload, using an empty object for [`ResponseEnvelope::Empty`].
    pub fn into_data(self) -> Value {
        match self {
            Self::Data(value) | Self::Config(value) | Self::TemplateDefinition(value) => value,
            Self::Empty => empty_data(),
        }
    }
}

/// Null, false, zero and empty strings/arrays/objects carry no payload.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Turns raw responses into [`ApiResponse`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer {
    strict_missing_key: bool,
}

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict checking, a successful GET whose body has none of the
    /// envelope keys (or is not JSON at all) is an error instead of an empty
    /// result.
    pub fn strict_missing_key(mut self, strict: bool) -> Self {
        self.strict_missing_key = strict;
        self
    }

    /// Classifies a raw response.
    ///
    /// # Errors
    ///
    /// Returns [`VManageError::UnexpectedStatus`] for status codes outside the
    /// success and error tables, and [`VManageError::MissingEnvelopeKey`] in
    /// strict mode as described on [`ResponseNormalizer::strict_missing_key`].
    pub fn normalize(&self, raw: RawResponse) -> VManageResult<ApiResponse> {
        if is_success_code(raw.status) {
            self.normalize_success(raw)
        } else if is_error_code(raw.status) {
            Ok(Self::normalize_error(raw))
        } else {
            Err(VManageError::UnexpectedStatus(raw.status))
        }
    }

    fn normalize_success(&self, raw: RawResponse) -> VManageResult<ApiResponse> {
        let reason = reason_phrase(raw.status).unwrap_or_default().to_string();
        let parsed = serde_json::from_str::<Value>(&raw.body);

        let (data, error) = if raw.method == Method::GET {
            match parsed {
                Ok(body) => {
                    if self.strict_missing_key && !ResponseEnvelope::has_envelope_key(&body) {
                        return Err(VManageError::MissingEnvelopeKey);
                    }
                    match ResponseEnvelope::decode(&body) {
                        ResponseEnvelope::Empty => (empty_data(), NO_DATA_RECEIVED.to_string()),
                        envelope => (envelope.into_data(), String::new()),
                    }
                }
                Err(e) => {
                    if self.strict_missing_key {
                        return Err(VManageError::MissingEnvelopeKey);
                    }
                    (empty_data(), format!("{NO_DATA_RECEIVED}: {e}"))
                }
            }
        } else {
            // Write bodies are informational; an unreadable one is not an error.
            let data = match parsed {
                Ok(Value::Null) | Err(_) => empty_data(),
                Ok(body) => body,
            };
            (data, String::new())
        };

        Ok(ApiResponse {
            ok: true,
            status_code: raw.status,
            error,
            reason,
            data,
            response: raw,
        })
    }

    fn normalize_error(raw: RawResponse) -> ApiResponse {
        let phrase = reason_phrase(raw.status).unwrap_or_default();

        let (reason, error) = match serde_json::from_str::<Value>(&raw.body) {
            Ok(body) => match body.get("error") {
                Some(detail) => (
                    text_field(detail, "details").unwrap_or_else(|| phrase.to_string()),
                    text_field(detail, "message").unwrap_or_else(|| phrase.to_string()),
                ),
                None => (
                    phrase.to_string(),
                    "Response body carries no error object".to_string(),
                ),
            },
            Err(e) => (phrase.to_string(), format!("Invalid JSON body: {e}")),
        };

        ApiResponse {
            ok: false,
            status_code: raw.status,
            error,
            reason,
            data: empty_data(),
            response: raw,
        }
    }
}

fn text_field(detail: &Value, key: &str) -> Option<String> {
    match detail.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
