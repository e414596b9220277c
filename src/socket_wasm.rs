//! Browser WebSocket connection manager
//!
//! Owns exactly one `web_sys::WebSocket` at a time. A dropped connection is
//! redialed after the configured delay, forever, until [`Socket::stop`] is
//! called. State transitions and inbound text frames are pushed to the
//! consumer through a single event callback.

use crate::config::ConnConfig;
use crate::conn_state::{ConnState, SocketEvent};
use crate::timer;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

type EventSink = Rc<dyn Fn(SocketEvent)>;

/// Event handler closures for the current socket. Replaced wholesale on
/// every dial; the browser drops its references when the old socket goes.
struct Handlers {
    on_open: Closure<dyn FnMut(Event)>,
    on_message: Closure<dyn FnMut(MessageEvent)>,
    on_error: Closure<dyn FnMut(Event)>,
    on_close: Closure<dyn FnMut(CloseEvent)>,
}

struct Inner {
    config: ConnConfig,
    state: ConnState,
    socket: Option<WebSocket>,
    handlers: Option<Handlers>,
    /// Pending redial timer, if any. At most one outstanding.
    retry_timer: Option<i32>,
    stopped: bool,
    sink: EventSink,
}

/// Handle to a managed connection.
///
/// The event closures hold their own references to the internals, so
/// dropping the handle does not tear the connection down; call
/// [`Socket::stop`] for that.
pub struct Socket {
    inner: Rc<RefCell<Inner>>,
}

impl Socket {
    /// Dial `config.url` and keep the connection alive.
    ///
    /// `on_event` sees every state transition and inbound text frame, in
    /// order. The first event is always `State(Connecting)`.
    pub fn start(
        config: ConnConfig,
        on_event: impl Fn(SocketEvent) + 'static,
    ) -> Result<Socket, JsValue> {
        let inner = Rc::new(RefCell::new(Inner {
            config,
            state: ConnState::Connecting,
            socket: None,
            handlers: None,
            retry_timer: None,
            stopped: false,
            sink: Rc::new(on_event),
        }));
        dial(&inner)?;
        Ok(Socket { inner })
    }

    /// Current connection state.
    #[allow(dead_code)]
    pub fn state(&self) -> ConnState {
        self.inner.borrow().state.clone()
    }

    /// Stop the connection: cancel any pending redial, detach the event
    /// handlers, and close the socket. Nothing dials again afterwards.
    #[allow(dead_code)]
    pub fn stop(&self) {
        let (socket, handlers, sink) = {
            let mut inner = self.inner.borrow_mut();
            if inner.stopped {
                return;
            }
            inner.stopped = true;
            inner.state = ConnState::Closed;
            if let Some(id) = inner.retry_timer.take() {
                timer::clear_timeout(id);
            }
            (inner.socket.take(), inner.handlers.take(), inner.sink.clone())
        };

        if let Some(ws) = socket {
            // Detach before closing so the close event does not redial.
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            if let Err(e) = ws.close() {
                warn!(?e, "Failed to close WebSocket");
            }
        }

        // A handler invocation may already be queued on the event loop;
        // leak the closures rather than free memory it could still enter.
        if let Some(h) = handlers {
            h.on_open.forget();
            h.on_message.forget();
            h.on_error.forget();
            h.on_close.forget();
        }

        info!("Connection stopped");
        sink(SocketEvent::State(ConnState::Closed));
    }
}

/// Open a socket and wire its callbacks. No-op once stopped.
fn dial(inner: &Rc<RefCell<Inner>>) -> Result<(), JsValue> {
    let (url, sink) = {
        let mut guard = inner.borrow_mut();
        if guard.stopped {
            return Ok(());
        }
        guard.state = ConnState::Connecting;
        (guard.config.url.clone(), guard.sink.clone())
    };
    sink(SocketEvent::State(ConnState::Connecting));

    info!(url = %url, "Connecting to WebSocket");
    let ws = WebSocket::new(&url)?;

    let on_open = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |_: Event| {
            info!("WebSocket connected");
            let sink = {
                let mut guard = inner.borrow_mut();
                guard.state = ConnState::Open;
                guard.sink.clone()
            };
            sink(SocketEvent::State(ConnState::Open));
        }) as Box<dyn FnMut(Event)>)
    };

    let on_message = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                let text: String = txt.into();
                debug!(len = text.len(), "Text frame received");
                let sink = inner.borrow().sink.clone();
                sink(SocketEvent::Message(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>)
    };

    // Surface the error state, then force-close so the close path owns the
    // retry. Browsers put no detail on WebSocket error events.
    let on_error = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |_: Event| {
            error!("WebSocket transport error");
            let (sink, socket) = {
                let mut guard = inner.borrow_mut();
                guard.state = ConnState::Error("transport error".to_string());
                (guard.sink.clone(), guard.socket.clone())
            };
            sink(SocketEvent::State(ConnState::Error(
                "transport error".to_string(),
            )));
            if let Some(ws) = socket {
                if let Err(e) = ws.close() {
                    warn!(?e, "Failed to close errored WebSocket");
                }
            }
        }) as Box<dyn FnMut(Event)>)
    };

    let on_close = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |e: CloseEvent| {
            warn!(code = e.code(), reason = %e.reason(), "WebSocket closed");
            let (sink, delay_ms, stopped) = {
                let mut guard = inner.borrow_mut();
                guard.state = ConnState::Closed;
                guard.socket = None;
                (guard.sink.clone(), guard.config.retry_delay_ms, guard.stopped)
            };
            sink(SocketEvent::State(ConnState::Closed));
            if !stopped {
                schedule_redial(&inner, delay_ms);
            }
        }) as Box<dyn FnMut(CloseEvent)>)
    };

    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    let mut guard = inner.borrow_mut();
    guard.socket = Some(ws);
    guard.handlers = Some(Handlers {
        on_open,
        on_message,
        on_error,
        on_close,
    });
    Ok(())
}

fn schedule_redial(inner: &Rc<RefCell<Inner>>, delay_ms: u32) {
    let retry = {
        let inner = inner.clone();
        timer::set_timeout(delay_ms as i32, move || {
            inner.borrow_mut().retry_timer = None;
            // A constructor failure here means a malformed URL; retrying
            // the same URL cannot help.
            if let Err(e) = dial(&inner) {
                error!(?e, "Redial failed");
            }
        })
    };
    match retry {
        Ok(id) => inner.borrow_mut().retry_timer = Some(id),
        Err(e) => error!(?e, "Failed to schedule redial"),
    }
}
