use super::*;
use serde_json::json;

#[test]
fn envelope_accepts_msg_alias_and_missing_data() {
    let env: Envelope = serde_json::from_value(json!({ "code": 500, "msg": "boom" })).unwrap();
    assert_eq!(env.code, 500);
    assert_eq!(env.message.as_deref(), Some("boom"));
    assert!(env.data.is_null());
}

#[test]
fn login_request_serializes_camel_case() {
    let req = LoginRequest { username: "a".into(), password: "b".into(), remember_me: true };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({ "username": "a", "password": "b", "rememberMe": true })
    );
}

#[test]
fn login_response_reads_role_and_user_id() {
    let resp: LoginResponse =
        serde_json::from_value(json!({ "token": "t", "role": 1, "userId": 42 })).unwrap();
    assert_eq!(resp.role, Some(Role::Admin));
    assert_eq!(resp.user_id, Some(42));
}

#[test]
fn login_response_tolerates_null_role() {
    let resp: LoginResponse = serde_json::from_value(json!({ "token": "t", "role": null })).unwrap();
    assert_eq!(resp.role, None);
    assert_eq!(resp.user_id, None);
}

#[test]
fn user_info_maps_to_identity() {
    let info: UserInfo = serde_json::from_value(json!({
        "userId": 5, "username": "neo", "nickname": "The One", "avatar": "/a.png", "email": "n@x.io"
    }))
    .unwrap();
    let identity = info.identity();
    assert_eq!(identity.user_id, Some(5));
    assert_eq!(identity.username.as_deref(), Some("neo"));
    assert_eq!(identity.avatar.as_deref(), Some("/a.png"));
}

#[test]
fn profile_update_skips_absent_fields() {
    let update = ProfileUpdate { nickname: Some("n".into()), ..ProfileUpdate::default() };
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "nickname": "n" }));
}

#[test]
fn page_defaults_and_last_page() {
    let page: Page<AppSummary> =
        serde_json::from_value(json!({ "content": [{ "appId": 1, "name": "Portal", "status": 2 }], "page": 0, "totalPages": 1 }))
            .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].status, AppStatus::InLibrary);
    assert!(page.is_last());
}

#[test]
fn unknown_app_status_is_not_owned() {
    assert_eq!(AppStatus::from(9), AppStatus::NotOwned);
    assert_eq!(AppStatus::from(1), AppStatus::Wishlisted);
}
