use super::*;
use crate::net::test_support::{MockTransport, pipeline};
use crate::state::session::SessionState;
use futures::executor::block_on;
use serde_json::json;

#[test]
fn shelf_routes_map_to_their_shelf() {
    assert_eq!(
        section_for("/specials?page=2"),
        Some(Section::Shelf { title: "Specials", shelf: Shelf::Specials })
    );
    assert_eq!(
        section_for("/free-games"),
        Some(Section::Shelf { title: "Free Games", shelf: Shelf::FreeGames })
    );
}

#[test]
fn app_route_parses_numeric_id() {
    assert_eq!(section_for("/app/570"), Some(Section::App(570)));
    assert_eq!(section_for("/app/dota"), Some(Section::Plain("Game")));
    assert_eq!(Section::App(570).title(), "Game #570");
}

#[test]
fn other_routes_render_title_only() {
    assert_eq!(section_for("/friends/pending"), Some(Section::Plain("Pending Requests")));
    assert_eq!(section_for("/nowhere"), None);
}

#[test]
fn plain_sections_send_no_request() {
    let transport = MockTransport::new();
    let pipeline = pipeline(&transport, SessionState::default());

    let games = block_on(load_section(&pipeline, &Section::Plain("About"))).unwrap();

    assert!(games.is_empty());
    assert!(transport.requests().is_empty());
}

#[test]
fn app_section_loads_one_game() {
    let transport = MockTransport::new();
    transport.push_data(json!({ "appId": 570, "name": "Dota 2" }));
    let pipeline = pipeline(&transport, SessionState::default());

    let games = block_on(load_section(&pipeline, &Section::App(570))).unwrap();

    assert_eq!(games[0].name, "Dota 2");
    assert_eq!(transport.last_request().path, "/app/570");
}
