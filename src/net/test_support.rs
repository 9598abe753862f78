//! Shared fixtures for pipeline, API and auth tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use super::pipeline::{AdminScopes, RequestPipeline};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;
use crate::state::auth::AuthActions;
use crate::state::cell::LocalCell;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::storage::{MemoryStorage, TierKind};
use crate::util::token_store::TokenStore;

pub type TestPipeline = RequestPipeline<LocalCell<SessionState>, LocalCell<NoticeState>>;
pub type TestActions = AuthActions<LocalCell<SessionState>, LocalCell<NoticeState>>;

/// Scripted transport: replays queued responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a `{ code: 200, data }` envelope.
    pub fn push_data(&self, data: Value) {
        self.push(Ok(HttpResponse { status: 200, body: json!({ "code": 200, "message": "ok", "data": data }) }));
    }

    pub fn push_envelope(&self, code: i64, message: &str) {
        self.push(Ok(HttpResponse { status: 200, body: json!({ "code": code, "message": message }) }));
    }

    pub fn push_status(&self, status: u16) {
        self.push(Ok(HttpResponse { status, body: Value::Null }));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}

pub fn pipeline(transport: &Arc<MockTransport>, session: SessionState) -> TestPipeline {
    RequestPipeline::new(
        transport.clone(),
        LocalCell::new(session),
        LocalCell::new(NoticeState::default()),
        AdminScopes::default(),
    )
}

pub fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// In-memory durable and session tiers, in that order.
pub fn memory_tokens() -> (TokenStore, MemoryStorage, MemoryStorage) {
    let durable = MemoryStorage::new();
    let session = MemoryStorage::new();
    let store = TokenStore::new(vec![
        (TierKind::Durable, Arc::new(durable.clone())),
        (TierKind::Session, Arc::new(session.clone())),
    ]);
    (store, durable, session)
}

pub fn actions(transport: &Arc<MockTransport>, session: SessionState) -> (TestActions, TokenStore) {
    let (tokens, _, _) = memory_tokens();
    (AuthActions::new(pipeline(transport, session), tokens.clone()), tokens)
}
