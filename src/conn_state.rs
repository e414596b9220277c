//! Shared connection state and socket events
//!
//! Used by both the wasm and native connection managers.

/// WebSocket connection state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnState {
    Connecting,
    Open,
    Closed,
    Error(String),
}

impl ConnState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnState::Open)
    }
}

/// Event emitted by a connection manager to its consumer.
///
/// State transitions and inbound text frames travel on the same channel so
/// consumers see them in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    State(ConnState),
    Message(String),
}
