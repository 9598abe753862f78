//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` and `notice` are plain models; `cell` abstracts how they are
//! shared; `auth` is the only code that mutates the session.

pub mod auth;
pub mod cell;
pub mod notice;
pub mod session;
