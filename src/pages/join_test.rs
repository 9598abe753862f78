use super::*;
use crate::net::test_support::{MockTransport, pipeline};
use crate::state::session::SessionState;
use futures::executor::block_on;
use serde_json::json;

fn filled() -> JoinForm {
    JoinForm {
        email: " neo@matrix.io ".to_owned(),
        username: "neo".to_owned(),
        password: "Redpill42".to_owned(),
        confirm: "Redpill42".to_owned(),
        tags: "RPG, Action;RPG".to_owned(),
    }
}

// =============================================================
// Form validation
// =============================================================

#[test]
fn valid_form_builds_request_with_parsed_tags() {
    let request = validate_join_form(&filled()).unwrap();
    assert_eq!(request.email, "neo@matrix.io");
    assert_eq!(request.tags, vec!["RPG".to_owned(), "Action".to_owned()]);
}

#[test]
fn blank_fields_are_refused() {
    let form = JoinForm { username: "  ".to_owned(), ..filled() };
    assert_eq!(validate_join_form(&form), Err("Fill in email, username and password."));
}

#[test]
fn bad_email_and_weak_password_are_refused() {
    let form = JoinForm { email: "neo".to_owned(), ..filled() };
    assert_eq!(validate_join_form(&form), Err("Enter a valid email address."));

    let form = JoinForm { password: "redpill".to_owned(), confirm: "redpill".to_owned(), ..filled() };
    assert!(validate_join_form(&form).unwrap_err().starts_with("Password needs"));
}

#[test]
fn mismatched_confirmation_is_refused() {
    let form = JoinForm { confirm: "Bluepill42".to_owned(), ..filled() };
    assert_eq!(validate_join_form(&form), Err("Passwords do not match."));
}

// =============================================================
// Registration flow
// =============================================================

#[test]
fn taken_username_stops_before_join() {
    let transport = MockTransport::new();
    transport.push_data(json!(false));
    let pipeline = pipeline(&transport, SessionState::default());
    let request = validate_join_form(&filled()).unwrap();

    let result = block_on(register(&pipeline, &request)).unwrap();

    assert_eq!(result, Err("That username is already taken."));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn free_username_and_email_register() {
    let transport = MockTransport::new();
    transport.push_data(json!(true));
    transport.push_data(json!(true));
    transport.push_data(json!(null));
    let pipeline = pipeline(&transport, SessionState::default());
    let request = validate_join_form(&filled()).unwrap();

    assert_eq!(block_on(register(&pipeline, &request)).unwrap(), Ok(()));
    assert_eq!(transport.last_request().path, "/user/join");
}

#[test]
fn taken_email_is_reported() {
    let transport = MockTransport::new();
    transport.push_data(json!(true));
    transport.push_data(json!(false));
    let pipeline = pipeline(&transport, SessionState::default());
    let request = validate_join_form(&filled()).unwrap();

    assert_eq!(block_on(register(&pipeline, &request)).unwrap(), Err("That email is already registered."));
}
