//! Terminal reader for the announcement feed
//!
//! Run with: cargo run --features cli --bin linkboard-cli

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use linkboard::config::ConnConfig;
    use linkboard::conn_state::SocketEvent;
    use linkboard::message::parse_broadcast;
    use linkboard::socket_native::BroadcastFeed;
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,linkboard=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let url =
        std::env::var("LINKBOARD_WS").unwrap_or_else(|_| "ws://localhost:8080/ws".to_string());

    info!(url = %url, "Reading announcement feed");
    let feed = BroadcastFeed::connect(ConnConfig::new(url));

    for event in feed.events.iter() {
        match event {
            SocketEvent::State(state) => info!(state = ?state, "Connection state changed"),
            SocketEvent::Message(payload) => {
                if let Some(content) = parse_broadcast(&payload) {
                    println!("{content}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
