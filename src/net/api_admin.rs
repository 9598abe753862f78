//! Admin console endpoints (`/admin/*`).
//!
//! Every path here falls under the default admin scope, so the pipeline
//! refuses these calls locally for non-admin sessions and no request leaves
//! the browser.

#[cfg(test)]
#[path = "api_admin_test.rs"]
mod api_admin_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::pipeline::{ApiClient, execute, fetch};
use super::transport::HttpRequest;
use super::types::{AppSummary, Page};
use crate::error::ApiError;
use crate::state::session::Role;

// =============================================================================
// DTOS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminUser {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub role: Option<Role>,
    pub enabled: Option<bool>,
    pub tags: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body for app create/update. The server stores `images` as one
/// comma-separated string.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<i64>,
}

/// Weights for the hybrid recommender.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendConfig {
    pub id: Option<i64>,
    pub content_weight: Option<f64>,
    pub collaborative_weight: Option<f64>,
    pub similarity_threshold: Option<f64>,
    pub algorithm_version: Option<String>,
    pub collaborative_filtering_weight: Option<f64>,
    pub content_based_weight: Option<f64>,
    pub hybrid_weight: Option<f64>,
}

pub type RecommendParams = BTreeMap<String, f64>;

/// Inclusive rating bounds for the rating-filtered app listings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RatingFilter {
    AtLeast(f64),
    AtMost(f64),
    Between(f64, f64),
}

impl RatingFilter {
    fn apply(self, page: u32, size: u32) -> HttpRequest {
        let (path, min, max) = match self {
            Self::AtLeast(min) => ("/admin/apps/high-rating", Some(min), None),
            Self::AtMost(max) => ("/admin/apps/low-rating", None, Some(max)),
            Self::Between(min, max) => ("/admin/apps/rating-range", Some(min), Some(max)),
        };
        HttpRequest::get(path)
            .query("page", page)
            .query("size", size)
            .query_opt("minRating", min)
            .query_opt("maxRating", max)
    }
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// USERS
// =============================================================================

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_users(client: &impl ApiClient, page: u32, size: u32) -> Result<Page<AdminUser>, ApiError> {
    fetch(client, HttpRequest::get("/admin/users").query("page", page).query("size", size)).await
}

/// Blank `username`/`email` filters are not sent.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn search_users(
    client: &impl ApiClient,
    page: u32,
    size: u32,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<Page<AdminUser>, ApiError> {
    let request = HttpRequest::get("/admin/users/search")
        .query("page", page)
        .query("size", size)
        .query_opt("username", blank_to_none(username))
        .query_opt("email", blank_to_none(email));
    fetch(client, request).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn set_user_role(client: &impl ApiClient, user_id: i64, role: Role) -> Result<(), ApiError> {
    let request = HttpRequest::put(format!("/admin/users/{user_id}/role")).json(json!({ "role": i64::from(role) }));
    execute(client, request).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn update_user_status(client: &impl ApiClient, user_id: i64, enabled: bool) -> Result<(), ApiError> {
    let request = HttpRequest::patch(format!("/admin/users/{user_id}/status")).json(json!({ "enabled": enabled }));
    execute(client, request).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn update_user_preferences(client: &impl ApiClient, user_id: i64, tags: &[String]) -> Result<(), ApiError> {
    let request = HttpRequest::post(format!("/admin/users/{user_id}/preferences")).json(json!({ "tags": tags }));
    execute(client, request).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn create_admin(client: &impl ApiClient, admin: &NewAdmin) -> Result<(), ApiError> {
    let body = serde_json::to_value(admin).unwrap_or_default();
    execute(client, HttpRequest::post("/admin/users/admin").json(body)).await
}

// =============================================================================
// APPS
// =============================================================================

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_apps(
    client: &impl ApiClient,
    page: u32,
    size: u32,
    keyword: Option<&str>,
    tag: Option<&str>,
) -> Result<Page<AppSummary>, ApiError> {
    let request = HttpRequest::get("/admin/apps")
        .query("page", page)
        .query("size", size)
        .query_opt("keyword", blank_to_none(keyword))
        .query_opt("tag", blank_to_none(tag));
    fetch(client, request).await
}

/// Returns the new app id.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn create_app(client: &impl ApiClient, draft: &AppDraft) -> Result<i64, ApiError> {
    let body = serde_json::to_value(draft).unwrap_or_default();
    fetch(client, HttpRequest::post("/admin/apps").json(body)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn update_app(client: &impl ApiClient, app_id: i64, draft: &AppDraft) -> Result<(), ApiError> {
    let body = serde_json::to_value(draft).unwrap_or_default();
    execute(client, HttpRequest::put(format!("/admin/apps/{app_id}")).json(body)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn delete_app(client: &impl ApiClient, app_id: i64) -> Result<(), ApiError> {
    execute(client, HttpRequest::delete(format!("/admin/apps/{app_id}"))).await
}

/// High-rating, low-rating and range listings, chosen by `filter`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_apps_by_rating(
    client: &impl ApiClient,
    filter: RatingFilter,
    page: u32,
    size: u32,
) -> Result<Page<AppSummary>, ApiError> {
    fetch(client, filter.apply(page, size)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_high_rating_apps(client: &impl ApiClient, page: u32, size: u32, min_rating: f64) -> Result<Page<AppSummary>, ApiError> {
    get_apps_by_rating(client, RatingFilter::AtLeast(min_rating), page, size).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_low_rating_apps(client: &impl ApiClient, page: u32, size: u32, max_rating: f64) -> Result<Page<AppSummary>, ApiError> {
    get_apps_by_rating(client, RatingFilter::AtMost(max_rating), page, size).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_apps_by_rating_range(
    client: &impl ApiClient,
    page: u32,
    size: u32,
    min_rating: f64,
    max_rating: f64,
) -> Result<Page<AppSummary>, ApiError> {
    get_apps_by_rating(client, RatingFilter::Between(min_rating, max_rating), page, size).await
}

// =============================================================================
// RECOMMENDER / SYSTEM
// =============================================================================

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_recommend_params(client: &impl ApiClient) -> Result<RecommendParams, ApiError> {
    fetch(client, HttpRequest::get("/admin/recommend-params")).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn update_recommend_params(client: &impl ApiClient, params: &RecommendParams) -> Result<(), ApiError> {
    let body = serde_json::to_value(params).unwrap_or_default();
    execute(client, HttpRequest::post("/admin/recommend-params").json(body)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_recommend_config(client: &impl ApiClient) -> Result<RecommendConfig, ApiError> {
    fetch(client, HttpRequest::get("/admin/recommend-config")).await
}

/// Returns the config as stored by the server.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn update_recommend_config(client: &impl ApiClient, config: &RecommendConfig) -> Result<RecommendConfig, ApiError> {
    let body = serde_json::to_value(config).unwrap_or_default();
    fetch(client, HttpRequest::post("/admin/recommend-config").json(body)).await
}

/// Dashboard counters; untyped since the server adds keys freely.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn get_statistics(client: &impl ApiClient) -> Result<serde_json::Value, ApiError> {
    client.call(HttpRequest::get("/admin/statistics")).await
}

/// Server-side admin check. A local non-admin session never gets this far.
///
/// # Errors
///
/// Returns the pipeline error when the call fails or is refused.
pub async fn check_admin(client: &impl ApiClient) -> Result<bool, ApiError> {
    fetch(client, HttpRequest::get("/admin/check-admin")).await
}
