//! Rating endpoints (`/rating/*`).

#[cfg(test)]
#[path = "api_ratings_test.rs"]
mod api_ratings_test;

use serde_json::json;

use super::pipeline::{ApiClient, execute, fetch};
use super::transport::HttpRequest;
use super::types::{Page, RatingRecord, RatingSubmission};
use crate::error::ApiError;

/// Server paging is 1-based for ratings.
pub const FIRST_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

fn paged(request: HttpRequest, page_index: u32, page_size: u32) -> HttpRequest {
    request.query("pageIndex", page_index.max(FIRST_PAGE)).query("pageSize", page_size)
}

/// `POST /rating/submit`. Submitting again for the same app replaces the
/// previous rating server-side.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn submit_rating(client: &impl ApiClient, submission: &RatingSubmission) -> Result<(), ApiError> {
    let body = serde_json::to_value(submission).unwrap_or_default();
    execute(client, HttpRequest::post("/rating/submit").json(body)).await
}

/// `GET /rating/user?appId=..`; `None` when the user has not rated the app.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_user_rating(client: &impl ApiClient, app_id: i64) -> Result<Option<RatingRecord>, ApiError> {
    fetch(client, HttpRequest::get("/rating/user").query("appId", app_id)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_app_ratings(
    client: &impl ApiClient,
    app_id: i64,
    page_index: u32,
    page_size: u32,
) -> Result<Page<RatingRecord>, ApiError> {
    let request = HttpRequest::get("/rating/app").query("appId", app_id);
    fetch(client, paged(request, page_index, page_size)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_user_rating_history(
    client: &impl ApiClient,
    user_id: i64,
    page_index: u32,
    page_size: u32,
) -> Result<Page<RatingRecord>, ApiError> {
    let request = HttpRequest::get("/rating/user/history").query("userId", user_id);
    fetch(client, paged(request, page_index, page_size)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_friend_ratings(client: &impl ApiClient, page_index: u32, page_size: u32) -> Result<Page<RatingRecord>, ApiError> {
    fetch(client, paged(HttpRequest::get("/rating/friends"), page_index, page_size)).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_recent_ratings(client: &impl ApiClient, page_index: u32, page_size: u32) -> Result<Page<RatingRecord>, ApiError> {
    fetch(client, paged(HttpRequest::get("/rating/recent"), page_index, page_size)).await
}

/// `POST /rating/delete`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn delete_rating(client: &impl ApiClient, rating_id: i64) -> Result<(), ApiError> {
    execute(client, HttpRequest::post("/rating/delete").json(json!({ "ratingId": rating_id }))).await
}
