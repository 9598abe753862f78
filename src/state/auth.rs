//! Auth actions: login, logout, identity refresh and admin check.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only writer that keeps `SessionState` and the persisted token in step.
//! Pages call these actions; the route guard calls `refresh_identity` and
//! `check_is_admin`.
//!
//! CONCURRENCY
//! ===========
//! `login` and `refresh_identity` take one async operation lock, so at most one
//! of them talks to the server at a time. `logout` never waits for that lock:
//! it clears state immediately and bumps the session epoch. An operation that
//! finds the epoch moved when its response arrives drops the result.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use futures::lock::Mutex;
use time::OffsetDateTime;

use super::cell::StateCell;
use super::notice::NoticeState;
use super::session::SessionState;
use crate::error::{ApiError, TransportError};
use crate::net::api;
use crate::net::pipeline::RequestPipeline;
use crate::net::types::LoginRequest;
use crate::util::token_store::TokenStore;

/// Result of a successful login. The token is in place even when the
/// follow-up identity fetch failed.
#[derive(Debug)]
pub struct LoginOutcome {
    pub identity_refresh: Result<(), ApiError>,
}

pub struct AuthActions<S, N> {
    pipeline: RequestPipeline<S, N>,
    tokens: TokenStore,
    op_lock: Arc<Mutex<()>>,
    clock: fn() -> OffsetDateTime,
}

impl<S: Clone, N: Clone> Clone for AuthActions<S, N> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            tokens: self.tokens.clone(),
            op_lock: Arc::clone(&self.op_lock),
            clock: self.clock,
        }
    }
}

impl<S, N> AuthActions<S, N>
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    pub fn new(pipeline: RequestPipeline<S, N>, tokens: TokenStore) -> Self {
        Self { pipeline, tokens, op_lock: Arc::new(Mutex::new(())), clock: OffsetDateTime::now_utc }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn pipeline(&self) -> &RequestPipeline<S, N> {
        &self.pipeline
    }

    pub fn session(&self) -> &S {
        self.pipeline.session()
    }

    pub fn notices(&self) -> &N {
        self.pipeline.notices()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn epoch(&self) -> u64 {
        self.session().read_with(SessionState::epoch)
    }

    /// Hydrate the session from the token store. Returns whether a token was
    /// found.
    pub fn restore(&self) -> bool {
        let token = self.tokens.load((self.clock)());
        let found = token.is_some();
        self.session().write_with(|s| s.set_token(token));
        if found {
            leptos::logging::log!("auth: restored persisted session");
        }
        found
    }

    /// Exchange credentials for a token, persist it, then fetch the identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when the server refuses the credentials or
    /// cannot be reached, or when a logout happened while the call was in
    /// flight.
    pub async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<LoginOutcome, ApiError> {
        let _op = self.op_lock.lock().await;
        let epoch = self.epoch();

        let request = LoginRequest { username: username.to_owned(), password: password.to_owned(), remember_me };
        let response = api::login(&self.pipeline, &request).await.map_err(|e| match e {
            ApiError::Transport(inner) => ApiError::Auth(inner),
            other => other,
        })?;
        if response.token.is_empty() {
            return Err(ApiError::Auth(TransportError::Decode("login response carried no token".to_owned())));
        }
        if self.epoch() != epoch {
            leptos::logging::warn!("auth: discarding login for {username}, session was reset");
            return Err(ApiError::Auth(TransportError::Cancelled));
        }

        self.session().write_with(|s| {
            s.set_token(None);
            s.set_token(Some(response.token.clone()));
            if let Some(role) = response.role {
                s.set_role(role);
            }
            s.set_user_id(response.user_id);
        });
        // A new sign-in replaces whatever account either tier still holds.
        self.tokens.clear();
        self.tokens.save(&response.token, remember_me, (self.clock)());
        leptos::logging::log!(
            "auth: signed in as {username} (role {:?}, remember {remember_me})",
            response.role.unwrap_or_default()
        );

        let identity_refresh = self.refresh_locked(epoch).await;
        if let Err(e) = &identity_refresh {
            leptos::logging::warn!("auth: identity refresh after login failed: {e}");
        }
        Ok(LoginOutcome { identity_refresh })
    }

    /// Re-fetch identity fields for the current token. Never changes the role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] without a token (or when the
    /// session was reset mid-flight) and the pipeline error when the fetch
    /// fails.
    pub async fn refresh_identity(&self) -> Result<(), ApiError> {
        let _op = self.op_lock.lock().await;
        let epoch = self.epoch();
        self.refresh_locked(epoch).await
    }

    /// Caller holds `op_lock`.
    async fn refresh_locked(&self, epoch: u64) -> Result<(), ApiError> {
        let (has_token, known_user_id) =
            self.session().read_with(|s| (s.current_token().is_some(), s.identity().user_id));
        if !has_token {
            return Err(ApiError::NotAuthenticated);
        }

        let info = api::get_user_info(&self.pipeline, known_user_id).await?;
        if self.epoch() != epoch {
            leptos::logging::warn!("auth: discarding identity refresh, session was reset");
            return Err(ApiError::NotAuthenticated);
        }

        let mut identity = info.identity();
        if identity.user_id.is_none() {
            identity.user_id = known_user_id;
        }
        let mut applied = false;
        self.session().write_with(|s| applied = s.set_identity(identity, None));
        if !applied {
            return Err(ApiError::NotAuthenticated);
        }
        if self.check_is_admin() {
            leptos::logging::log!("auth: identity refreshed (admin)");
        }
        Ok(())
    }

    /// Local role check; never calls the server.
    pub fn check_is_admin(&self) -> bool {
        self.session().read_with(SessionState::is_admin)
    }

    /// Drop the session and persisted token, then ask the host to reset its
    /// views. Does not contact the server.
    pub fn logout(&self) {
        self.session().write_with(SessionState::logout);
        self.tokens.clear();
        self.notices().write_with(|n| {
            n.dismiss();
            n.request_reset();
        });
        leptos::logging::log!("auth: signed out");
    }
}
