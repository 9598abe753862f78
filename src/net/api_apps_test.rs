use super::*;
use crate::net::test_support::{MockTransport, pipeline, query_value};
use crate::net::transport::Method;
use crate::state::session::SessionState;
use futures::executor::block_on;
use serde_json::json;

fn empty_page() -> serde_json::Value {
    json!({ "content": [], "page": 0, "size": 0, "totalElements": 0, "totalPages": 0 })
}

#[test]
fn shelves_map_to_paths() {
    assert_eq!(Shelf::Recommendations.path(), "/app/recommendations");
    assert_eq!(Shelf::NewReleases.path(), "/app/new-releases");
    assert_eq!(Shelf::Specials.path(), "/app/specials");
    assert_eq!(Shelf::FreeGames.path(), "/app/free-games");
}

#[test]
fn shelf_query_only_sends_present_params() {
    let transport = MockTransport::new();
    transport.push_data(empty_page());
    transport.push_data(empty_page());
    let pipeline = pipeline(&transport, SessionState::default());

    block_on(get_specials(&pipeline, &ShelfQuery::default())).unwrap();
    assert!(transport.last_request().query.is_empty());

    let query = ShelfQuery { page_index: Some(2), page_size: None, tag: Some("Indie".into()) };
    block_on(get_free_games(&pipeline, &query)).unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.path, "/app/free-games");
    assert_eq!(query_value(&sent, "pageIndex"), Some("2"));
    assert_eq!(query_value(&sent, "tag"), Some("Indie"));
    assert_eq!(query_value(&sent, "pageSize"), None);
}

#[test]
fn games_request_without_tag_hits_root() {
    let req = games_request(None);
    assert_eq!(req.path, "/app");
    assert_eq!(query_value(&req, "tag"), Some(""));

    let req = games_request(Some("   "));
    assert_eq!(req.path, "/app");
}

#[test]
fn games_request_with_tag_encodes_segment() {
    let req = games_request(Some("Open World"));
    assert_eq!(req.path, "/app/tag/Open%20World");
    assert_eq!(query_value(&req, "tag"), Some("Open World"));
    assert_eq!(query_value(&req, "pageSize"), Some("50"));
}

#[test]
fn app_detail_and_personalized() {
    let transport = MockTransport::new();
    transport.push_data(json!({ "appId": 620, "name": "Portal 2", "tags": ["Puzzle"] }));
    transport.push_data(json!([{ "appId": 1, "name": "A" }]));
    let pipeline = pipeline(&transport, SessionState::with_token(Some("t".into())));

    let app = block_on(get_app(&pipeline, 620)).unwrap();
    assert_eq!(app.name, "Portal 2");
    assert_eq!(transport.requests()[0].path, "/app/620");

    let list = block_on(get_personalized_recommendations(&pipeline, DEFAULT_PERSONALIZED_LIMIT)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(query_value(&transport.last_request(), "limit"), Some("12"));
}

#[test]
fn search_suggestions_request_games() {
    let transport = MockTransport::new();
    transport.push_data(empty_page());
    let pipeline = pipeline(&transport, SessionState::default());

    block_on(get_search_suggestions(&pipeline, " portal ")).unwrap();

    let sent = transport.last_request();
    assert_eq!(query_value(&sent, "keyword"), Some("portal"));
    assert_eq!(query_value(&sent, "returnGames"), Some("true"));
}

#[test]
fn preferences_are_posted_as_joined_query() {
    let transport = MockTransport::new();
    transport.push_data(json!(null));
    let pipeline = pipeline(&transport, SessionState::with_token(Some("t".into())));

    block_on(update_user_preferences(&pipeline, &["RPG".to_owned(), "Action".to_owned()])).unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(query_value(&sent, "tags"), Some("RPG,Action"));
}

#[test]
fn hybrid_recommendations_decode_list() {
    let transport = MockTransport::new();
    transport.push_data(json!([]));
    let pipeline = pipeline(&transport, SessionState::default());

    assert!(block_on(get_hybrid_recommendations(&pipeline)).unwrap().is_empty());
    assert_eq!(transport.last_request().path, "/app/hybrid-recommendations");
}
