//! "Login with Google" widget for Streamlit, compiled to WebAssembly.
//!
//! The same page plays two roles.  Embedded in the host's iframe it renders
//! a login/logout button and reports the access token to the host; opened
//! as the OAuth popup it receives the provider's redirect, relays the token
//! to the iframe and closes itself.

use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;

pub mod browser;
pub mod command_executors;
pub mod config;
pub mod constants;
pub mod fragment;
pub mod host;
pub mod messages;
pub mod models;
pub mod oauth;
pub mod ports;
pub mod redirect;
pub mod state;
pub mod storage;
pub mod update;
pub mod views;

use crate::browser::{listen_for_renders, TimeoutScheduler, WindowMessageSource, WindowOpener, WindowPopup};
use crate::config::WidgetConfig;
use crate::host::StreamlitBridge;
use crate::redirect::handle_redirect;
use crate::state::{install_runtime, with_runtime, Ports, Runtime};
use crate::storage::LocalStorageStore;
use crate::views::DomSurface;

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;

    let config = WidgetConfig::new().unwrap_or_else(|e| {
        debug_log!("{}; using the default Google endpoint", e);
        WidgetConfig::default()
    });
    let store = LocalStorageStore::new(&config.storage_key)?;

    // Popup role: relay the provider's response and stop here.
    let fragment = window.location().hash()?;
    if handle_redirect(&fragment, &store, &WindowOpener::new(window.clone())) {
        return Ok(());
    }

    // Widget role.
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;
    let origin = window.location().origin()?;

    let ports = Ports {
        host: Box::new(StreamlitBridge::new(&window)?),
        store: Box::new(store),
        listener: Box::new(WindowMessageSource::new(window.clone())),
        scheduler: Box::new(TimeoutScheduler::default()),
        popup: Box::new(WindowPopup::new(window.clone())),
        surface: Box::new(DomSurface::new(document)),
    };
    install_runtime(Runtime::new(&origin, config, ports));

    // The first render event only arrives after the ready signal.
    listen_for_renders(&window)?;
    with_runtime(|rt| rt.announce());

    Ok(())
}
