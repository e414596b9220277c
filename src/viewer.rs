//! Live text viewer
//!
//! Audience-facing page: renders the latest broadcast announcement and a
//! three-way feed status (online / offline / error). The endpoint follows
//! the page's own host and protocol so the same build works behind TLS.

use crate::config::{page_endpoint, ConnConfig};
use crate::conn_state::SocketEvent;
use crate::dom;
use crate::message::parse_broadcast;
use crate::socket_wasm::Socket;
use crate::status::viewer_status;
use tracing::info;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Element whose presence marks a page as hosting the viewer.
pub const ROOT_ID: &str = "live-text";

/// Wire the viewer's DOM and start its connection.
pub fn mount(doc: &Document) -> Result<(), JsValue> {
    let status: Element = dom::require(doc, "status")?;
    let live_text: Element = dom::require(doc, "live-text")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let location = window.location();
    let url = page_endpoint(&location.protocol()?, &location.host()?);

    let _socket = Socket::start(ConnConfig::new(url.clone()), move |event| match event {
        SocketEvent::State(state) => {
            let view = viewer_status(&state);
            status.set_class_name(view.css_class);
            status.set_text_content(Some(view.label));
        }
        SocketEvent::Message(payload) => {
            // Invalid payloads leave the previous announcement up.
            if let Some(content) = parse_broadcast(&payload) {
                live_text.set_text_content(Some(&content));
            }
        }
    })?;

    info!(url = %url, "Viewer mounted");
    Ok(())
}
