//! Test utilities shared by the unit tests in `src/`.
//!
//! Only compiled when running tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ZendeskError;
use crate::transport::{Transport, TransportRequest};

enum Reply {
    Body(Vec<u8>),
    Status(StatusCode, String),
}

/// A [`Transport`] that records every request and answers with one canned
/// reply.
pub struct MockTransport {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answers every request with `body` serialized as JSON.
    pub fn responding(body: serde_json::Value) -> Arc<Self> {
        Self::new(Reply::Body(body.to_string().into_bytes()))
    }

    /// Answers every request with the given raw bytes.
    pub fn raw(body: Vec<u8>) -> Arc<Self> {
        Self::new(Reply::Body(body))
    }

    /// Fails every request with a non-2xx status.
    pub fn failing(status: StatusCode, body: &str) -> Arc<Self> {
        Self::new(Reply::Status(status, body.to_string()))
    }

    /// Number of requests that reached the transport.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, ZendeskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status, body) => Err(ZendeskError::HttpStatus {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
