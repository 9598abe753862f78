use super::*;

#[test]
fn banner_shows_latest_message() {
    let mut state = NoticeState::default();
    assert_eq!(banner_text(&state), None);

    state.push("first");
    state.push("Admin privileges are required to access this page.");
    assert_eq!(banner_text(&state).as_deref(), Some("Admin privileges are required to access this page."));
}

#[test]
fn banner_hides_after_dismiss_or_blank_message() {
    let mut state = NoticeState::default();
    state.push("  ");
    assert_eq!(banner_text(&state), None);

    state.push("denied");
    state.dismiss();
    assert_eq!(banner_text(&state), None);
}
