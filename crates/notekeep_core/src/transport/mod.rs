//! JSON-over-HTTP transport for the notes API.
//!
//! # Responsibility
//! - Resolve `<base-endpoint><path>` and inject JSON headers.
//! - Turn failure statuses into normalized `ApiError` values.
//! - Decode success bodies into the caller's expected shape.
//!
//! # Invariants
//! - Every request carries `Content-Type: application/json`; callers can add
//!   headers but cannot replace that one.
//! - One `send`/`request` call issues exactly one backend call.
//! - Inspecting a failure body never raises an error of its own.

mod backend;
mod error;

pub use backend::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, ReqwestBackend};
pub use error::{ApiError, ApiResult};

use crate::config::ApiConfig;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_MEDIA_TYPE: &str = "application/json";

/// One API call relative to the configured base endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    method: HttpMethod,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a `GET` request for `path` (for example `/notes/1`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Attaches an already serialized JSON body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> ApiResult<Self> {
        let body = serde_json::to_string(value)
            .map_err(|err| ApiError::InvalidRequest(format!("body serialization: {err}")))?;
        Ok(self.body(body))
    }

    /// Adds an extra header. `Content-Type` is ignored.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Issues notes API requests through an `HttpBackend`.
pub struct Transport<B: HttpBackend = ReqwestBackend> {
    config: ApiConfig,
    backend: B,
}

impl Transport<ReqwestBackend> {
    /// Creates a transport over the default reqwest backend.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_backend(config, ReqwestBackend::new())
    }
}

impl<B: HttpBackend> Transport<B> {
    pub fn with_backend(config: ApiConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends `request` and returns the raw success response.
    ///
    /// # Errors
    /// - `ApiError::Server` when a failure body carries an `error` message.
    /// - `ApiError::Status` when a failure body is absent or unstructured.
    /// - Backend errors (`Network`, `InvalidRequest`) unchanged.
    pub fn send(&self, request: &ApiRequest) -> ApiResult<HttpResponse> {
        let started_at = Instant::now();
        let url = self.config.url_for(&request.path);
        let headers = request_headers(&request.headers);
        let method = request.method.as_str();
        debug!(
            "event=api_request module=transport status=start method={} path={}",
            method, request.path
        );

        let response = match self.backend.execute(&HttpRequest {
            method: request.method,
            url: &url,
            headers: &headers,
            body: request.body.as_deref(),
        }) {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=api_request module=transport status=error method={} path={} duration_ms={} error_code={} error={}",
                    method,
                    request.path,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        if !response.is_success() {
            let err = failure_from_body(response.status, &response.body);
            warn!(
                "event=api_request module=transport status=error method={} path={} http_status={} duration_ms={} error_code={}",
                method,
                request.path,
                response.status,
                started_at.elapsed().as_millis(),
                err.code()
            );
            return Err(err);
        }

        info!(
            "event=api_request module=transport status=ok method={} path={} http_status={} duration_ms={}",
            method,
            request.path,
            response.status,
            started_at.elapsed().as_millis()
        );
        Ok(response)
    }

    /// Sends `request` and decodes the success body as `T`.
    pub fn request<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let response = self.send(request)?;
        serde_json::from_slice(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Projects one field out of a decoded response envelope.
///
/// `{"note": {...}}` with `field = "note"` yields the inner value decoded
/// as `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(mut envelope: Value, field: &str) -> ApiResult<T> {
    let inner = envelope
        .as_object_mut()
        .and_then(|object| object.remove(field))
        .ok_or_else(|| ApiError::Decode(format!("response is missing `{field}` field")))?;
    serde_json::from_value(inner)
        .map_err(|err| ApiError::Decode(format!("invalid `{field}` field: {err}")))
}

fn request_headers(extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(extra.len() + 1);
    headers.push((CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string()));
    headers.extend(
        extra
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
            .cloned(),
    );
    headers
}

fn failure_from_body(status: u16, body: &[u8]) -> ApiError {
    match failure_message(body) {
        Some(message) => ApiError::Server { status, message },
        None => ApiError::Status { status },
    }
}

fn failure_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        // Validation failures arrive as `{"error": {"field": "message"}}`.
        Value::Object(fields) if !fields.is_empty() => Some(
            fields
                .iter()
                .map(|(field, message)| match message {
                    Value::String(text) => format!("{field}: {text}"),
                    other => format!("{field}: {other}"),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}
