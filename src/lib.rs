//! # storefront
//!
//! Leptos + WASM front end for the game storefront.
//!
//! The core is the session/auth layer: a persisted token store, the session
//! state machine, auth actions, the request pipeline every API call goes
//! through, and the route guard. Pages and components are thin consumers of
//! that layer. Native builds (no `csr` feature) compile everything except the
//! browser transport and storage bindings, which is what the tests run.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
