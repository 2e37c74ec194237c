//! Recording transport for tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use super::{ApiClient, ApiRequest, Body, Method, RawResponse, Transport};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::MemorySession;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
    pub file_names: Vec<String>,
}

/// Answers with queued responses in order and records every request
#[derive(Default)]
pub struct FakeTransport {
    calls: RefCell<Vec<RecordedCall>>,
    responses: RefCell<VecDeque<RawResponse>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_bytes(status, body.to_string().into_bytes());
    }

    pub fn respond_bytes(&self, status: u16, body: Vec<u8>) {
        self.responses.borrow_mut().push_back(RawResponse { status, body });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, url: &str, request: ApiRequest) -> Result<RawResponse> {
        let (body, file_names) = match &request.body {
            Body::Empty => (None, Vec::new()),
            Body::Json(value) => (Some(value.clone()), Vec::new()),
            Body::Files(files) => (None, files.iter().map(|f| f.name.clone()).collect()),
        };
        self.calls.borrow_mut().push(RecordedCall {
            method: request.method,
            url: url.to_string(),
            bearer: request.bearer.clone(),
            body,
            file_names,
        });

        if let Some(report) = &request.on_progress {
            report(50);
            report(100);
        }

        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Network(format!("no response queued for {}", url)))
    }
}

/// Client over `fake` with an empty in-memory session
pub fn test_client(fake: &Rc<FakeTransport>) -> (ApiClient, Rc<MemorySession>) {
    let session = Rc::new(MemorySession::default());
    let client = ApiClient::new(ApiConfig::new("http://api.test"), fake.clone(), session.clone());
    (client, session)
}
