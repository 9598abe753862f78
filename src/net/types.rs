//! Wire DTOs for the storefront REST API.
//!
//! DESIGN
//! ======
//! Field names follow the server's camelCase JSON. Most content fields are
//! optional with serde defaults because the server omits nulls inconsistently
//! across endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::session::{Identity, Role};

/// Code the server puts in the envelope for a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Standard response envelope: `{ code, message, data }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

// =============================================================================
// AUTH / USER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// `/user/info` payload. Carries no role; the session keeps the one login set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub tags: Option<String>,
    pub create_time: Option<String>,
}

impl UserInfo {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
            nickname: self.nickname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JoinRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub tags: Vec<String>,
}

/// Fields accepted by `PUT /user/update`; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSummary {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

// =============================================================================
// PAGINATION
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.total_pages
    }
}

// =============================================================================
// APPS / RATINGS
// =============================================================================

/// Ownership status of an app for the current user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum AppStatus {
    #[default]
    NotOwned,
    Wishlisted,
    InLibrary,
}

impl From<i64> for AppStatus {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Wishlisted,
            2 => Self::InLibrary,
            _ => Self::NotOwned,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSummary {
    pub app_id: i64,
    pub name: String,
    pub cover: Option<String>,
    pub header: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<f64>,
    pub final_price: Option<f64>,
    pub discount: Option<f64>,
    pub win: Option<bool>,
    pub mac: Option<bool>,
    pub linux: Option<bool>,
    pub status: AppStatus,
    pub release_time: Option<String>,
    pub positive_rate: Option<f64>,
    pub tags: Vec<String>,
    pub popularity: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub app_id: i64,
    pub recommended: bool,
    pub comment: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingRecord {
    pub rating_id: Option<i64>,
    pub app_id: Option<i64>,
    pub app_name: Option<String>,
    pub app_cover: Option<String>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub recommended: Option<bool>,
    pub comment: Option<String>,
    pub rating_time: Option<String>,
}
