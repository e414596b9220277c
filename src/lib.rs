//! linkboard - live announcement front end
//!
//! Browser clients that keep a WebSocket open to the announcement server,
//! redialing on drop after a fixed 1-second delay:
//! - the link panel shows a connected/disconnected indicator and copies the
//!   invite link to the clipboard
//! - the viewer displays the latest broadcast text
//!
//! A native reader for the same feed lives behind the `cli` feature:
//! `cargo run --features cli --bin linkboard-cli`

pub mod config;
pub mod conn_state;
pub mod message;
pub mod status;

#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod panel;
#[cfg(target_arch = "wasm32")]
mod socket_wasm;
#[cfg(target_arch = "wasm32")]
mod timer;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod socket_native;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Route tracing to the browser console
    tracing_wasm::set_as_global_default();

    let document = web_sys::window()
        .expect("no window")
        .document()
        .expect("no document");

    // Each page hosts one client; mount whichever root elements are
    // present. The clients are independent, each with its own socket.
    if document.get_element_by_id(panel::ROOT_ID).is_some() {
        if let Err(e) = panel::mount(&document) {
            tracing::error!(?e, "Failed to mount link panel");
        }
    }
    if document.get_element_by_id(viewer::ROOT_ID).is_some() {
        if let Err(e) = viewer::mount(&document) {
            tracing::error!(?e, "Failed to mount viewer");
        }
    }
}
