//! Cached user preference tags.
//!
//! The server is the source of truth; this cache lets the store pages render
//! tag-filtered shelves before `/user/info` answers.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::storage::StorageTier;

pub const PREFERENCES_KEY: &str = "userPreferences";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Load a JSON value stored under `key`. Unreadable values count as absent.
pub fn load_json<T: DeserializeOwned>(tier: &dyn StorageTier, key: &str) -> Option<T> {
    let raw = tier.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(tier: &dyn StorageTier, key: &str, value: &T) -> bool {
    let Ok(raw) = serde_json::to_string(value) else {
        return false;
    };
    tier.set(key, &raw)
}

pub fn load_preferences(tier: &dyn StorageTier) -> Option<UserPreferences> {
    load_json(tier, PREFERENCES_KEY)
}

pub fn save_preferences(tier: &dyn StorageTier, preferences: &UserPreferences) -> bool {
    save_json(tier, PREFERENCES_KEY, preferences)
}

/// Split a server-side `"a,b;c"` tag string into trimmed, de-duplicated tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split([',', ';']).map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}
