use super::*;

#[test]
fn push_sets_message_and_bumps_seq() {
    let mut notices = NoticeState::default();
    notices.push(ADMIN_REQUIRED_MESSAGE);
    notices.push(ADMIN_REQUIRED_MESSAGE);
    assert_eq!(notices.message.as_deref(), Some(ADMIN_REQUIRED_MESSAGE));
    assert_eq!(notices.message_seq, 2);
}

#[test]
fn dismiss_keeps_seq() {
    let mut notices = NoticeState::default();
    notices.push("x");
    notices.dismiss();
    assert!(notices.message.is_none());
    assert_eq!(notices.message_seq, 1);
}

#[test]
fn reset_requests_are_counted() {
    let mut notices = NoticeState::default();
    notices.request_reset();
    assert_eq!(notices.reset_seq, 1);
    assert!(notices.message.is_none());
}
