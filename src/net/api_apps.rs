//! Store catalogue endpoints (`/app/*`).

#[cfg(test)]
#[path = "api_apps_test.rs"]
mod api_apps_test;

use super::pipeline::{ApiClient, execute, fetch};
use super::transport::HttpRequest;
use super::types::{AppSummary, Page};
use crate::error::ApiError;

const SHELF_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PERSONALIZED_LIMIT: u32 = 12;

/// Paging/filter parameters shared by the store shelves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShelfQuery {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
    pub tag: Option<String>,
}

impl ShelfQuery {
    fn apply(&self, request: HttpRequest) -> HttpRequest {
        request
            .query_opt("pageIndex", self.page_index)
            .query_opt("pageSize", self.page_size)
            .query_opt("tag", self.tag.as_deref())
    }
}

/// Named storefront shelves backed by `GET /app/<shelf>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shelf {
    Recommendations,
    NewReleases,
    Specials,
    FreeGames,
}

impl Shelf {
    pub fn path(self) -> &'static str {
        match self {
            Self::Recommendations => "/app/recommendations",
            Self::NewReleases => "/app/new-releases",
            Self::Specials => "/app/specials",
            Self::FreeGames => "/app/free-games",
        }
    }
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_shelf(client: &impl ApiClient, shelf: Shelf, query: &ShelfQuery) -> Result<Page<AppSummary>, ApiError> {
    fetch(client, query.apply(HttpRequest::get(shelf.path()))).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_recommendations(client: &impl ApiClient, query: &ShelfQuery) -> Result<Page<AppSummary>, ApiError> {
    get_shelf(client, Shelf::Recommendations, query).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_new_releases(client: &impl ApiClient, query: &ShelfQuery) -> Result<Page<AppSummary>, ApiError> {
    get_shelf(client, Shelf::NewReleases, query).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_specials(client: &impl ApiClient, query: &ShelfQuery) -> Result<Page<AppSummary>, ApiError> {
    get_shelf(client, Shelf::Specials, query).await
}

/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_free_games(client: &impl ApiClient, query: &ShelfQuery) -> Result<Page<AppSummary>, ApiError> {
    get_shelf(client, Shelf::FreeGames, query).await
}

/// `GET /app/hybrid-recommendations`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_hybrid_recommendations(client: &impl ApiClient) -> Result<Vec<AppSummary>, ApiError> {
    fetch(client, HttpRequest::get("/app/hybrid-recommendations")).await
}

/// `GET /app/personalized-recommendations?limit=..`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_personalized_recommendations(client: &impl ApiClient, limit: u32) -> Result<Vec<AppSummary>, ApiError> {
    fetch(client, HttpRequest::get("/app/personalized-recommendations").query("limit", limit)).await
}

/// `POST /app/user-preferences?tags=a,b`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn update_user_preferences(client: &impl ApiClient, tags: &[String]) -> Result<(), ApiError> {
    execute(client, HttpRequest::post("/app/user-preferences").query("tags", tags.join(","))).await
}

/// `GET /app/search/suggestions`, asking the server to return full games.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_search_suggestions(client: &impl ApiClient, keyword: &str) -> Result<Page<AppSummary>, ApiError> {
    let request = HttpRequest::get("/app/search/suggestions")
        .query("keyword", keyword.trim())
        .query("pageIndex", 0)
        .query("pageSize", SHELF_PAGE_SIZE)
        .query("returnGames", true);
    fetch(client, request).await
}

/// `GET /app/{appId}`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_app(client: &impl ApiClient, app_id: i64) -> Result<AppSummary, ApiError> {
    fetch(client, HttpRequest::get(format!("/app/{app_id}"))).await
}

/// `GET /app` or, with a non-blank tag, `GET /app/tag/{tag}`.
///
/// # Errors
///
/// Returns the pipeline error when the call fails.
pub async fn get_games(client: &impl ApiClient, tag: Option<&str>) -> Result<Page<AppSummary>, ApiError> {
    fetch(client, games_request(tag)).await
}

fn games_request(tag: Option<&str>) -> HttpRequest {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());
    let path = match tag {
        Some(tag) => format!("/app/tag/{}", encode_segment(tag)),
        None => "/app".to_owned(),
    };
    HttpRequest::get(path)
        .query("pageIndex", 0)
        .query("pageSize", SHELF_PAGE_SIZE)
        .query("tag", tag.unwrap_or_default())
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
