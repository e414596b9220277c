//! Link panel client
//!
//! Operator-facing page: shows whether the announcement feed is reachable
//! and offers a copy button for the invite link. Incoming broadcasts are
//! logged, never rendered here.

use crate::clipboard;
use crate::config::ConnConfig;
use crate::conn_state::SocketEvent;
use crate::dom;
use crate::socket_wasm::Socket;
use crate::status::panel_status;
use tracing::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Announcement feed endpoint for the operator panel.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

/// Element whose presence marks a page as hosting the link panel.
pub const ROOT_ID: &str = "statusDot";

/// Wire the panel's DOM and start its connection.
pub fn mount(doc: &Document) -> Result<(), JsValue> {
    let dot: Element = dom::require(doc, "statusDot")?;
    let text: Element = dom::require(doc, "statusText")?;
    let button: Element = dom::require(doc, "connectButton")?;

    clipboard::wire_copy_button(doc)?;

    let _socket = Socket::start(ConnConfig::new(DEFAULT_WS_URL), move |event| match event {
        SocketEvent::State(state) => {
            let view = panel_status(&state);
            dot.set_class_name(&format!("status-dot {}", view.css_class));
            text.set_text_content(Some(view.label));
            button.set_class_name(&format!("connect-button {}", view.css_class));
            button.set_text_content(Some(view.label));
        }
        SocketEvent::Message(payload) => {
            debug!(payload = %payload, "Broadcast received");
        }
    })?;
    // The socket's callbacks keep it alive for the page's lifetime; the
    // handle only matters for an explicit stop, which no control issues.

    info!(url = DEFAULT_WS_URL, "Link panel mounted");
    Ok(())
}
