//! WebAssembly enhancement layer for the release download page.
//!
//! The page ships as static HTML. This crate fills in the version badge and
//! download links from a [`config::ReleaseConfig`], renders the prior-release
//! list, and wires the page's interactive bits: the list toggle, smooth
//! in-page scrolling, entrance animations and the persisted light/dark theme.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::PageController`] and its setup steps |
//! | [`config`] | Release configuration and artifact kinds |
//! | [`version`] | Clean-version derivation, template expansion, filtering |
//! | [`markup`] | HTML for prior-version rows |
//! | [`theme`] | Theme preference load/save |
//! | [`page`] | [`page::Page`] / [`page::KeyValueStore`] environment traits |
//! | `browser` | `web_sys` environment and startup (`browser` feature) |
//! | [`consts`] | DOM ids, selectors, classes, storage key, animation styles |

pub mod config;
pub mod consts;
pub mod controller;
pub mod markup;
pub mod page;
pub mod theme;
pub mod version;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
mod fake;

/// WASM entry point.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already installed");
    }
    browser::boot();
}
