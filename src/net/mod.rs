//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends raw requests, `pipeline` applies token, admin-scope and
//! error rules to every call, `types` defines the wire schema, and the `api*`
//! modules are typed wrappers per endpoint family.

pub mod api;
pub mod api_admin;
pub mod api_apps;
pub mod api_ratings;
pub mod pipeline;
#[cfg(test)]
pub(crate) mod test_support;
pub mod transport;
pub mod types;
