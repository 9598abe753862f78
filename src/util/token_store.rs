//! Persisted auth token with per-tier expiration.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Remember me" logins go to the durable tier for 30 days; other logins go
//! to the session tier for 30 minutes. Tiers are consulted in the order they
//! were registered, so the durable tier wins when both hold a token.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails outward. Expired or unparsable records are purged and
//! reported as absent.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::Arc;

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use super::storage::{BrowserStorage, StorageTier, TierKind};

pub const TOKEN_KEY: &str = "token";
pub const EXPIRATION_KEY: &str = "tokenExpiration";

pub const DURABLE_TTL: Duration = Duration::days(30);
pub const SESSION_TTL: Duration = Duration::minutes(30);

/// A stored token as read back from one tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRecord {
    pub token: String,
    pub expires_at: Option<OffsetDateTime>,
}

#[derive(Clone)]
pub struct TokenStore {
    tiers: Vec<(TierKind, Arc<dyn StorageTier>)>,
}

impl TokenStore {
    /// Store over an explicit ordered tier list (first match wins on load).
    pub fn new(tiers: Vec<(TierKind, Arc<dyn StorageTier>)>) -> Self {
        Self { tiers }
    }

    /// Durable `localStorage` first, then `sessionStorage`.
    pub fn browser() -> Self {
        Self::new(vec![
            (TierKind::Durable, Arc::new(BrowserStorage::new(TierKind::Durable))),
            (TierKind::Session, Arc::new(BrowserStorage::new(TierKind::Session))),
        ])
    }

    /// First unexpired token across tiers.
    pub fn load(&self, now: OffsetDateTime) -> Option<String> {
        self.tiers
            .iter()
            .find_map(|(kind, tier)| read_tier(*kind, tier.as_ref(), now))
            .map(|record| record.token)
    }

    /// Persist `token` in the tier picked by `remember_me`; the other tier is
    /// left alone.
    pub fn save(&self, token: &str, remember_me: bool, now: OffsetDateTime) {
        let (kind, ttl) = if remember_me {
            (TierKind::Durable, DURABLE_TTL)
        } else {
            (TierKind::Session, SESSION_TTL)
        };
        let Some(tier) = self.tier(kind) else {
            leptos::logging::warn!("token store: no {} tier registered", kind.label());
            return;
        };
        let Ok(encoded) = serde_json::to_string(token) else {
            return;
        };
        let Ok(expires_at) = (now + ttl).format(&Rfc3339) else {
            return;
        };
        if !(tier.set(TOKEN_KEY, &encoded) && tier.set(EXPIRATION_KEY, &expires_at)) {
            leptos::logging::warn!("token store: failed to persist token in {} tier", kind.label());
        }
    }

    /// Remove the token and expiration from every tier.
    pub fn clear(&self) {
        for (_, tier) in &self.tiers {
            purge(tier.as_ref());
        }
    }

    /// Raw record of one tier without expiry filtering.
    pub fn record(&self, kind: TierKind) -> Option<TokenRecord> {
        let tier = self.tier(kind)?;
        let token = serde_json::from_str::<String>(&tier.get(TOKEN_KEY)?).ok()?;
        let expires_at = tier
            .get(EXPIRATION_KEY)
            .and_then(|raw| OffsetDateTime::parse(&raw, &Rfc3339).ok());
        Some(TokenRecord { token, expires_at })
    }

    fn tier(&self, kind: TierKind) -> Option<&dyn StorageTier> {
        self.tiers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, tier)| tier.as_ref())
    }
}

fn read_tier(kind: TierKind, tier: &dyn StorageTier, now: OffsetDateTime) -> Option<TokenRecord> {
    let raw_token = tier.get(TOKEN_KEY)?;
    let Ok(token) = serde_json::from_str::<String>(&raw_token) else {
        leptos::logging::warn!("token store: purging malformed token in {} tier", kind.label());
        purge(tier);
        return None;
    };
    if token.is_empty() {
        purge(tier);
        return None;
    }

    let expires_at = match tier.get(EXPIRATION_KEY) {
        None => None,
        Some(raw) => match OffsetDateTime::parse(raw.trim(), &Rfc3339) {
            Ok(at) => Some(at),
            Err(_) => {
                leptos::logging::warn!("token store: purging unreadable expiration in {} tier", kind.label());
                purge(tier);
                return None;
            }
        },
    };

    if expires_at.is_some_and(|at| now > at) {
        leptos::logging::log!("token store: {} token expired", kind.label());
        purge(tier);
        return None;
    }
    Some(TokenRecord { token, expires_at })
}

fn purge(tier: &dyn StorageTier) {
    tier.remove(TOKEN_KEY);
    tier.remove(EXPIRATION_KEY);
}
