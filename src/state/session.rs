//! Session state for the signed-in storefront user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionState` exists per running client. It owns the in-memory token
//! and identity; the token store keeps the persisted copy and auth actions keep
//! the two consistent. Route guards and the request pipeline only read it.
//!
//! INVARIANTS
//! ==========
//! - Identity fields are only populated while a token is present.
//! - `Role::Admin` is only ever set from an explicit role value; identity
//!   refreshes that omit the role keep whatever role is current.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Account role as reported by the identity service (`0` regular, `1` admin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Regular),
            1 => Ok(Self::Admin),
            other => Err(format!("unknown role code {other}")),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        match role {
            Role::Regular => 0,
            Role::Admin => 1,
        }
    }
}

/// Coarse session phase derived from token and role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticated,
    AuthenticatedAdmin,
}

/// Identity attributes fetched from `/user/info`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

/// Snapshot handed to views; mirrors what the header and profile links need.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSnapshot {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    token: Option<String>,
    identity: Identity,
    role: Role,
    epoch: u64,
}

impl SessionState {
    /// Session hydrated from a previously persisted token.
    pub fn with_token(token: Option<String>) -> Self {
        let mut state = Self::default();
        state.set_token(token);
        state
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.token, self.role) {
            (None, _) => SessionPhase::Anonymous,
            (Some(_), Role::Admin) => SessionPhase::AuthenticatedAdmin,
            (Some(_), Role::Regular) => SessionPhase::Authenticated,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.phase() == SessionPhase::AuthenticatedAdmin
    }

    pub fn current_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn current_user(&self) -> UserSnapshot {
        UserSnapshot {
            user_id: self.identity.user_id,
            username: self.identity.username.clone(),
            nickname: self.identity.nickname.clone(),
            avatar: self.identity.avatar.clone(),
            role: self.role,
        }
    }

    /// Bumped on every logout; in-flight operations compare it before committing.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Token present but the identity has not been fetched (or only partially).
    pub fn needs_identity(&self) -> bool {
        self.token.is_some() && (self.identity.username.is_none() || self.identity.user_id.is_none())
    }

    /// Install or drop the token. Dropping it returns the session to anonymous.
    pub fn set_token(&mut self, token: Option<String>) {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.token = Some(token),
            None => {
                self.token = None;
                self.identity = Identity::default();
                self.role = Role::Regular;
            }
        }
    }

    /// Record the user id returned by login before the full identity arrives.
    pub fn set_user_id(&mut self, user_id: Option<i64>) {
        if self.token.is_some() {
            self.identity.user_id = user_id;
        }
    }

    /// Apply an explicitly reported role.
    pub fn set_role(&mut self, role: Role) {
        if self.token.is_some() {
            self.role = role;
        }
    }

    /// Replace identity fields. `role` is applied only when the caller has one;
    /// `None` leaves the current role untouched. Returns `false` when ignored
    /// because there is no token.
    pub fn set_identity(&mut self, identity: Identity, role: Option<Role>) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.identity = identity;
        if let Some(role) = role {
            self.role = role;
        }
        true
    }

    /// Clear token and identity and start a new epoch.
    pub fn logout(&mut self) {
        self.set_token(None);
        self.epoch = self.epoch.wrapping_add(1);
    }
}
