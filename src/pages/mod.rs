//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and keeps its decision logic in
//! plain functions so it can be tested without a browser.

pub mod admin;
pub mod join;
pub mod login;
pub mod section;
pub mod store;
