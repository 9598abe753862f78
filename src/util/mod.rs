//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser storage, persisted tokens and preferences, routing and form
//! validation live here so pages stay thin and these pieces stay testable
//! without a browser.

pub mod auth;
pub mod preferences;
pub mod routes;
pub mod storage;
pub mod token_store;
pub mod validate;
