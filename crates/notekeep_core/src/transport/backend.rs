//! HTTP backend contract and reqwest implementation.
//!
//! # Responsibility
//! - Perform exactly one network round-trip per `execute` call.
//! - Return status and raw body without interpreting either.
//!
//! # Invariants
//! - Backends never retry, cache or follow up on a request.
//! - Status handling and JSON decoding stay in `Transport`.

use super::error::{ApiError, ApiResult};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

/// HTTP verb supported by the notes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Fully resolved request handed to a backend.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    pub method: HttpMethod,
    pub url: &'a str,
    pub headers: &'a [(String, String)],
    pub body: Option<&'a str>,
}

/// Raw response as received from the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network seam used by `Transport`.
pub trait HttpBackend {
    fn execute(&self, request: &HttpRequest<'_>) -> ApiResult<HttpResponse>;
}

/// Blocking reqwest-backed HTTP backend.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Uses a preconfigured client (proxy, TLS roots).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackend for ReqwestBackend {
    fn execute(&self, request: &HttpRequest<'_>) -> ApiResult<HttpResponse> {
        let headers = header_map(request.headers)?;
        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn header_map(headers: &[(String, String)]) -> ApiResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| ApiError::InvalidRequest(format!("header name `{name}`: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| ApiError::InvalidRequest(format!("header `{name}` value: {err}")))?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::{header_map, HttpResponse};
    use crate::transport::ApiError;

    #[test]
    fn success_range_is_2xx_only() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        let redirect = HttpResponse {
            status: 302,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn invalid_header_name_is_rejected_before_sending() {
        let headers = vec![("bad header".to_string(), "x".to_string())];
        let err = header_map(&headers).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn repeated_headers_are_kept() {
        let headers = vec![
            ("X-Trace".to_string(), "a".to_string()),
            ("X-Trace".to_string(), "b".to_string()),
        ];
        let map = header_map(&headers).unwrap();
        assert_eq!(map.get_all("x-trace").iter().count(), 2);
    }
}
