//! REST API helpers for the `/user/*` endpoints.
//!
//! All helpers go through an [`ApiClient`] (normally the request pipeline),
//! so token attachment and error normalization happen in one place.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `Result<_, ApiError>` and never panic; pages decide how to
//! render failures.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::pipeline::{ApiClient, execute, fetch};
use super::transport::HttpRequest;
use super::types::{JoinRequest, LoginRequest, LoginResponse, Page, ProfileUpdate, RatingRecord, UserInfo, UserSummary};
use crate::error::ApiError;

/// `POST /user/login`.
///
/// # Errors
///
/// Returns the pipeline error when the credentials are rejected or the call fails.
pub async fn login(client: &impl ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let body = serde_json::to_value(request).unwrap_or_default();
    fetch(client, HttpRequest::post("/user/login").json(body)).await
}

/// `GET /user/info?userId=..`. Without a user id the server answers for the
/// token's owner.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_user_info(client: &impl ApiClient, user_id: Option<i64>) -> Result<UserInfo, ApiError> {
    fetch(client, HttpRequest::get("/user/info").query_opt("userId", user_id)).await
}

/// `GET /user/available?username=..`; `true` when the name is free.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn check_username_available(client: &impl ApiClient, username: &str) -> Result<bool, ApiError> {
    fetch(client, HttpRequest::get("/user/available").query("username", username)).await
}

/// `GET /user/email/available?email=..`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn check_email_available(client: &impl ApiClient, email: &str) -> Result<bool, ApiError> {
    fetch(client, HttpRequest::get("/user/email/available").query("email", email)).await
}

/// `POST /user/join`.
///
/// # Errors
///
/// Returns the pipeline error when registration is refused or the call fails.
pub async fn join(client: &impl ApiClient, request: &JoinRequest) -> Result<(), ApiError> {
    let body = serde_json::to_value(request).unwrap_or_default();
    execute(client, HttpRequest::post("/user/join").json(body)).await
}

/// `GET /user/search`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn search_users(
    client: &impl ApiClient,
    keyword: &str,
    page_index: u32,
    page_size: u32,
) -> Result<Page<UserSummary>, ApiError> {
    let request = HttpRequest::get("/user/search")
        .query("keyword", keyword)
        .query("pageIndex", page_index)
        .query("pageSize", page_size);
    fetch(client, request).await
}

/// `PUT /user/update`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn update_user_info(client: &impl ApiClient, update: &ProfileUpdate) -> Result<(), ApiError> {
    let body = serde_json::to_value(update).unwrap_or_default();
    execute(client, HttpRequest::put("/user/update").json(body)).await
}

/// `GET /user/ratings`, the signed-in user's own ratings.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_user_ratings(client: &impl ApiClient, page: u32, size: u32) -> Result<Page<RatingRecord>, ApiError> {
    fetch(client, HttpRequest::get("/user/ratings").query("page", page).query("size", size)).await
}

/// `GET /user/stats`. The payload shape varies by server version, so it is
/// returned untyped.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_user_game_stats(client: &impl ApiClient) -> Result<serde_json::Value, ApiError> {
    client.call(HttpRequest::get("/user/stats")).await
}

/// Body for `POST /user/join` with trimmed fields and blank tags dropped.
pub fn join_request(email: &str, username: &str, password: &str, tags: &[String]) -> JoinRequest {
    JoinRequest {
        email: email.trim().to_owned(),
        username: username.trim().to_owned(),
        password: password.to_owned(),
        tags: tags.iter().map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()).collect(),
    }
}

