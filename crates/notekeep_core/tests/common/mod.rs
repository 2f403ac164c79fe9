#![allow(dead_code)]

use notekeep_core::{
    ApiConfig, ApiError, ApiResult, HttpBackend, HttpMethod, HttpRequest, HttpResponse,
    NoteService, Transport,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

pub const BASE_URL: &str = "http://localhost:4000/v1";

/// One request as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(self.body.as_deref().unwrap()).unwrap()
    }
}

/// Backend that records requests and replays scripted responses.
#[derive(Default)]
pub struct ScriptedBackend {
    requests: RefCell<Vec<Recorded>>,
    responses: RefCell<VecDeque<ApiResult<HttpResponse>>>,
}

impl ScriptedBackend {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(status, &body.to_string())
    }

    pub fn fail(self, err: ApiError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }
}

impl HttpBackend for ScriptedBackend {
    fn execute(&self, request: &HttpRequest<'_>) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(Recorded {
            method: request.method,
            url: request.url.to_string(),
            headers: request.headers.to_vec(),
            body: request.body.map(str::to_string),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("no scripted response left")
    }
}

pub fn service(backend: ScriptedBackend) -> NoteService<ScriptedBackend> {
    let config = ApiConfig::new(BASE_URL).unwrap();
    NoteService::with_transport(Transport::with_backend(config, backend))
}

pub fn note_json(id: i64, title: &str, version: i64) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "body": "Test Body",
        "tags": ["test"],
        "archived": false,
        "updated_at": "2024-01-01T00:00:00Z",
        "version": version,
    })
}
