//! Request pipeline shared by every API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits between the typed API helpers and the transport:
//! 1. attaches `Authorization: Bearer <token>` and an `x-request-id`;
//! 2. blocks admin-scoped paths locally unless the session role is admin;
//! 3. turns a 403 into `ApiError::Permission` plus an inline notice;
//! 4. rejects non-2xx statuses and envelopes whose code is not 200.
//!
//! A 403 never triggers navigation or a reload. The notice is the only side
//! effect.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::transport::{HttpRequest, Transport};
use super::types::{Envelope, SUCCESS_CODE};
use crate::error::{ApiError, TransportError};
use crate::state::cell::StateCell;
use crate::state::notice::{ADMIN_REQUIRED_MESSAGE, NoticeState};
use crate::state::session::SessionState;

/// Explicit list of path prefixes that require the admin role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminScopes {
    prefixes: Vec<String>,
}

impl AdminScopes {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { prefixes: prefixes.into_iter().map(Into::into).collect() }
    }

    /// Segment-aware prefix match: `/admin` covers `/admin` and `/admin/users`
    /// but not `/administrator`.
    pub fn covers(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            prefix.is_empty()
                || path == prefix
                || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl Default for AdminScopes {
    fn default() -> Self {
        Self::new([crate::config::DEFAULT_ADMIN_SCOPE])
    }
}

/// Anything that can execute a request and hand back the envelope payload.
#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    /// Send `request` and return the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Permission`] for blocked or forbidden calls and
    /// [`ApiError::Transport`] for every other failure.
    async fn call(&self, request: HttpRequest) -> Result<serde_json::Value, ApiError>;
}

/// Send `request` and decode the payload as `T`.
///
/// # Errors
///
/// Propagates [`ApiClient::call`] errors; a payload that does not match `T`
/// becomes [`TransportError::Decode`].
pub async fn fetch<T: DeserializeOwned>(client: &impl ApiClient, request: HttpRequest) -> Result<T, ApiError> {
    let data = client.call(request).await?;
    serde_json::from_value(data).map_err(|e| TransportError::Decode(e.to_string()).into())
}

/// Send `request` and discard the payload.
///
/// # Errors
///
/// Propagates [`ApiClient::call`] errors.
pub async fn execute(client: &impl ApiClient, request: HttpRequest) -> Result<(), ApiError> {
    client.call(request).await.map(|_| ())
}

pub struct RequestPipeline<S, N> {
    transport: Arc<dyn Transport>,
    session: S,
    notices: N,
    admin_scopes: AdminScopes,
}

impl<S: Clone, N: Clone> Clone for RequestPipeline<S, N> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: self.session.clone(),
            notices: self.notices.clone(),
            admin_scopes: self.admin_scopes.clone(),
        }
    }
}

impl<S, N> RequestPipeline<S, N>
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    pub fn new(transport: Arc<dyn Transport>, session: S, notices: N, admin_scopes: AdminScopes) -> Self {
        Self { transport, session, notices, admin_scopes }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }

    pub fn admin_scopes(&self) -> &AdminScopes {
        &self.admin_scopes
    }

    fn prepare(&self, mut request: HttpRequest) -> Result<HttpRequest, ApiError> {
        let (token, is_admin) = self
            .session
            .read_with(|s| (s.current_token().map(str::to_owned), s.is_admin()));

        if self.admin_scopes.covers(&request.path) && !is_admin {
            leptos::logging::warn!("pipeline: blocked {} {} (admin role required)", request.method.as_str(), request.path);
            return Err(ApiError::Permission(ADMIN_REQUIRED_MESSAGE.to_owned()));
        }

        // The backend reads the raw `token` header.
        if let Some(token) = token {
            request.set_header("Authorization", format!("Bearer {token}"));
            request.set_header("token", token);
        }
        request.set_header("x-request-id", uuid::Uuid::new_v4().to_string());
        Ok(request)
    }
}

#[async_trait::async_trait(?Send)]
impl<S, N> ApiClient for RequestPipeline<S, N>
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    async fn call(&self, request: HttpRequest) -> Result<serde_json::Value, ApiError> {
        let request = self.prepare(request)?;
        let label = format!("{} {}", request.method.as_str(), request.path);

        let response = self.transport.send(request).await.map_err(|e| {
            leptos::logging::warn!("pipeline: {label} failed: {e}");
            ApiError::Transport(e)
        })?;

        if response.status == 403 {
            leptos::logging::warn!("pipeline: {label} forbidden");
            self.notices.write_with(|n| n.push(ADMIN_REQUIRED_MESSAGE));
            return Err(ApiError::Permission(ADMIN_REQUIRED_MESSAGE.to_owned()));
        }
        if !response.ok() {
            leptos::logging::warn!("pipeline: {label} returned http {}", response.status);
            return Err(TransportError::Status { status: response.status }.into());
        }

        let envelope: Envelope =
            serde_json::from_value(response.body).map_err(|e| TransportError::Decode(e.to_string()))?;
        if envelope.code != SUCCESS_CODE {
            leptos::logging::warn!("pipeline: {label} rejected with code {}", envelope.code);
            return Err(TransportError::Rejected {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            }
            .into());
        }
        Ok(envelope.data)
    }
}
