use super::*;
use crate::net::test_support::{MockTransport, pipeline};
use crate::net::transport::HttpResponse;
use crate::state::session::Role;
use futures::executor::block_on;
use serde_json::json;

fn regular_session() -> SessionState {
    SessionState::with_token(Some("tok-r".to_owned()))
}

fn admin_session() -> SessionState {
    let mut session = SessionState::with_token(Some("tok-a".to_owned()));
    session.set_role(Role::Admin);
    session
}

// =============================================================
// AdminScopes
// =============================================================

#[test]
fn admin_scope_matches_whole_segments() {
    let scopes = AdminScopes::default();
    assert!(scopes.covers("/admin"));
    assert!(scopes.covers("/admin/users"));
    assert!(scopes.covers("/admin/users?page=1"));
    assert!(!scopes.covers("/administrator"));
    assert!(!scopes.covers("/app/admin"));
}

#[test]
fn admin_scopes_are_configurable() {
    let scopes = AdminScopes::new(["/admin", "/ops/"]);
    assert!(scopes.covers("/ops/metrics"));
    assert!(!scopes.covers("/opsx"));
}

// =============================================================
// Header attachment
// =============================================================

#[test]
fn attaches_bearer_token_and_request_id() {
    let transport = MockTransport::new();
    transport.push_data(json!([]));
    let pipeline = pipeline(&transport, regular_session());

    block_on(pipeline.call(HttpRequest::get("/app"))).unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.header("Authorization"), Some("Bearer tok-r"));
    assert_eq!(sent.header("token"), Some("tok-r"));
    assert!(sent.header("x-request-id").is_some_and(|id| id.len() == 36));
}

#[test]
fn anonymous_calls_carry_no_authorization() {
    let transport = MockTransport::new();
    transport.push_data(json!(true));
    let pipeline = pipeline(&transport, SessionState::default());

    let data = block_on(pipeline.call(HttpRequest::get("/user/available"))).unwrap();

    assert_eq!(data, json!(true));
    assert!(transport.last_request().header("Authorization").is_none());
    assert!(transport.last_request().header("token").is_none());
}

// =============================================================
// Admin pre-flight
// =============================================================

#[test]
fn admin_call_as_regular_never_reaches_transport() {
    let transport = MockTransport::new();
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(pipeline.call(HttpRequest::get("/admin/users"))).unwrap_err();

    assert!(matches!(err, ApiError::Permission(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn admin_call_as_anonymous_is_blocked() {
    let transport = MockTransport::new();
    let pipeline = pipeline(&transport, SessionState::default());

    let err = block_on(pipeline.call(HttpRequest::get("/admin/check-admin"))).unwrap_err();

    assert!(matches!(err, ApiError::Permission(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn admin_call_as_admin_is_sent() {
    let transport = MockTransport::new();
    transport.push_data(json!({ "users": 3 }));
    let pipeline = pipeline(&transport, admin_session());

    let data = block_on(pipeline.call(HttpRequest::get("/admin/statistics"))).unwrap();

    assert_eq!(data["users"], 3);
    assert_eq!(transport.requests().len(), 1);
}

// =============================================================
// Response normalization
// =============================================================

#[test]
fn forbidden_yields_permission_error_and_notice() {
    let transport = MockTransport::new();
    transport.push_status(403);
    let pipeline = pipeline(&transport, admin_session());

    let err = block_on(pipeline.call(HttpRequest::get("/admin/users"))).unwrap_err();

    assert_eq!(err, ApiError::Permission(ADMIN_REQUIRED_MESSAGE.to_owned()));
    let notice = pipeline.notices().read_with(Clone::clone);
    assert_eq!(notice.message.as_deref(), Some(ADMIN_REQUIRED_MESSAGE));
    assert_eq!(notice.reset_seq, 0);
}

#[test]
fn non_success_code_is_rejected() {
    let transport = MockTransport::new();
    transport.push_envelope(500, "rating not found");
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(pipeline.call(HttpRequest::post("/rating/delete"))).unwrap_err();

    assert_eq!(
        err,
        ApiError::Transport(TransportError::Rejected { code: 500, message: "rating not found".to_owned() })
    );
}

#[test]
fn http_error_status_is_rejected() {
    let transport = MockTransport::new();
    transport.push_status(502);
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(pipeline.call(HttpRequest::get("/app"))).unwrap_err();

    assert_eq!(err, ApiError::Transport(TransportError::Status { status: 502 }));
}

#[test]
fn transport_failure_is_passed_through() {
    let transport = MockTransport::new();
    transport.push(Err(TransportError::Timeout(std::time::Duration::from_secs(5))));
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(pipeline.call(HttpRequest::get("/app"))).unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
}

#[test]
fn body_without_envelope_is_a_decode_error() {
    let transport = MockTransport::new();
    transport.push(Ok(HttpResponse { status: 200, body: json!(["bare"]) }));
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(pipeline.call(HttpRequest::get("/app"))).unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Decode(_))));
}

#[test]
fn fetch_decodes_typed_payload() {
    let transport = MockTransport::new();
    transport.push_data(json!({ "userId": 1, "username": "a" }));
    let pipeline = pipeline(&transport, regular_session());

    let info: crate::net::types::UserInfo = block_on(fetch(&pipeline, HttpRequest::get("/user/info"))).unwrap();

    assert_eq!(info.username.as_deref(), Some("a"));
}

#[test]
fn fetch_reports_shape_mismatch() {
    let transport = MockTransport::new();
    transport.push_data(json!("nope"));
    let pipeline = pipeline(&transport, regular_session());

    let err = block_on(fetch::<crate::net::types::UserInfo>(&pipeline, HttpRequest::get("/user/info"))).unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Decode(_))));
}
