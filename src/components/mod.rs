//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared session and notice state from Leptos context
//! providers and render chrome shared by every page.

pub mod notice_banner;
