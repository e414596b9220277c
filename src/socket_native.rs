//! Native feed client
//!
//! Uses tokio-tungstenite in a background thread, with channel-based event
//! passing. The connection is redialed after the configured delay whenever
//! it drops; the loop ends when the receiver is dropped.

use crate::config::ConnConfig;
use crate::conn_state::{ConnState, SocketEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{error, info, warn};

/// Native broadcast feed running in a background thread.
pub struct BroadcastFeed {
    /// Receiver for state transitions and inbound messages
    pub events: Receiver<SocketEvent>,
}

impl BroadcastFeed {
    /// Connect to the feed endpoint.
    ///
    /// Spawns a background thread with a tokio runtime to own the
    /// connection. Events are delivered through `self.events`; dropping the
    /// receiver stops the redial loop and ends the thread.
    pub fn connect(config: ConnConfig) -> Self {
        let (tx, rx): (Sender<SocketEvent>, Receiver<SocketEvent>) = mpsc::channel();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "Failed to create tokio runtime");
                    let _ = tx.send(SocketEvent::State(ConnState::Error(e.to_string())));
                    return;
                }
            };
            rt.block_on(async move {
                run_feed(&config, tx).await;
            });
        });

        Self { events: rx }
    }
}

async fn run_feed(config: &ConnConfig, tx: Sender<SocketEvent>) {
    use futures_util::StreamExt;
    use tokio_tungstenite::{connect_async, tungstenite::Message};

    let delay = std::time::Duration::from_millis(u64::from(config.retry_delay_ms));

    loop {
        if tx.send(SocketEvent::State(ConnState::Connecting)).is_err() {
            return;
        }
        info!(url = %config.url, "Connecting to WebSocket");

        match connect_async(config.url.as_str()).await {
            Ok((mut ws_stream, _)) => {
                info!("WebSocket connected");
                if tx.send(SocketEvent::State(ConnState::Open)).is_err() {
                    return;
                }

                // The feed is read-only: no frame is ever sent, so the
                // stream is consumed whole instead of being split.
                while let Some(msg) = ws_stream.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if tx.send(SocketEvent::Message(text.to_string())).is_err() {
                                return;
                            }
                        }
                        Ok(Message::Close(_)) => {
                            warn!("WebSocket closed by server");
                            break;
                        }
                        Err(e) => {
                            error!(error = %e, "WebSocket error");
                            let _ = tx.send(SocketEvent::State(ConnState::Error(e.to_string())));
                            break;
                        }
                        _ => {}
                    }
                }

                warn!("WebSocket stream ended");
                if tx.send(SocketEvent::State(ConnState::Closed)).is_err() {
                    return;
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to connect");
                if tx
                    .send(SocketEvent::State(ConnState::Error(e.to_string())))
                    .is_err()
                {
                    return;
                }
            }
        }

        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::SinkExt;
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message;

    fn next_state(feed: &BroadcastFeed) -> ConnState {
        loop {
            match feed.events.recv_timeout(Duration::from_secs(5)) {
                Ok(SocketEvent::State(state)) => return state,
                Ok(SocketEvent::Message(_)) => continue,
                Err(e) => panic!("no event within timeout: {e}"),
            }
        }
    }

    /// Skip transport error details; the loop always follows them with
    /// Closed before redialing.
    fn wait_for_closed(feed: &BroadcastFeed) {
        loop {
            match next_state(feed) {
                ConnState::Closed => return,
                ConnState::Error(_) => continue,
                other => panic!("unexpected state before close: {other:?}"),
            }
        }
    }

    #[test]
    fn reconnects_after_server_drop() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let listener = rt
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept two connections, dropping each right after the handshake.
        rt.spawn(async move {
            for _ in 0..2 {
                let (stream, _) = listener.accept().await.unwrap();
                let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                drop(ws);
            }
        });

        let config = ConnConfig::new(format!("ws://{addr}/ws")).with_retry_delay(50);
        let feed = BroadcastFeed::connect(config);

        assert_eq!(next_state(&feed), ConnState::Connecting);
        assert_eq!(next_state(&feed), ConnState::Open);
        wait_for_closed(&feed);
        // The redial after the drop is the behavior under test.
        assert_eq!(next_state(&feed), ConnState::Connecting);
        assert_eq!(next_state(&feed), ConnState::Open);
    }

    #[test]
    fn keeps_retrying_when_unreachable() {
        // Bind then drop to get a local port with no listener.
        let rt = tokio::runtime::Runtime::new().unwrap();
        let addr = rt
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap()
            .local_addr()
            .unwrap();
        drop(rt);

        let config = ConnConfig::new(format!("ws://{addr}/ws")).with_retry_delay(20);
        let feed = BroadcastFeed::connect(config);

        let mut failures = 0;
        for _ in 0..8 {
            if let ConnState::Error(_) = next_state(&feed) {
                failures += 1;
                if failures >= 2 {
                    break;
                }
            }
        }
        assert!(failures >= 2, "expected repeated dial failures, got {failures}");
    }

    #[test]
    fn forwards_text_frames() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let listener = rt
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();

        rt.spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::Text(r#"{"content":"salut"}"#.into()))
                .await
                .unwrap();
            // Hold the connection until the client has read the frame
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let config = ConnConfig::new(format!("ws://{addr}/ws")).with_retry_delay(50);
        let feed = BroadcastFeed::connect(config);

        loop {
            match feed.events.recv_timeout(Duration::from_secs(5)).unwrap() {
                SocketEvent::Message(payload) => {
                    assert_eq!(
                        crate::message::parse_broadcast(&payload).as_deref(),
                        Some("salut")
                    );
                    return;
                }
                SocketEvent::State(_) => continue,
            }
        }
    }
}
