//! Inline notices raised by auth flows (permission denials, session resets).
//!
//! DESIGN
//! ======
//! One-shot UI requests are modelled as sequence counters, the way board view
//! overrides are: a view watches the counter and reacts when it moves.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin privileges are required to access this page.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub message: Option<String>,
    pub message_seq: u64,
    /// Incremented when the host should reset its views (after logout).
    pub reset_seq: u64,
}

impl NoticeState {
    pub fn push(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_seq += 1;
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn request_reset(&mut self) {
        self.reset_seq += 1;
    }
}
