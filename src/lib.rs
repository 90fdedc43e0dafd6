//! # boimarker
//!
//! Leptos + WASM client for the Boimarker eBook library and bookmark
//! manager.
//!
//! The crate holds the persistent token store, the auth session manager
//! that owns login state, and the route guard that gates pages on it,
//! together with the pages, components and HTTP client for the Boimarker
//! REST backend.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
