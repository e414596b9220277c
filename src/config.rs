//! Connection configuration
//!
//! Endpoint URL and retry delay are injected into the connection managers
//! rather than hardcoded at the call sites, so the clients and tests can
//! pick their own.

/// Delay before redialing a dropped connection, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u32 = 1000;

/// Configuration for a single WebSocket connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnConfig {
    pub url: String,
    pub retry_delay_ms: u32,
}

impl ConnConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }

    pub fn with_retry_delay(mut self, ms: u32) -> Self {
        self.retry_delay_ms = ms;
        self
    }
}

/// Derive the feed endpoint from the page location.
///
/// Pages served over HTTPS must use `wss://`; everything else gets `ws://`.
pub fn page_endpoint(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retry_delay_is_one_second() {
        let config = ConnConfig::new("ws://localhost:8080/ws");
        assert_eq!(config.retry_delay_ms, 1000);
    }

    #[test]
    fn retry_delay_override() {
        let config = ConnConfig::new("ws://localhost:8080/ws").with_retry_delay(50);
        assert_eq!(config.retry_delay_ms, 50);
    }

    #[test]
    fn secure_page_gets_wss() {
        assert_eq!(page_endpoint("https:", "example.org"), "wss://example.org/ws");
    }

    #[test]
    fn plain_page_gets_ws() {
        assert_eq!(page_endpoint("http:", "localhost:8080"), "ws://localhost:8080/ws");
    }

    #[test]
    fn unknown_protocol_falls_back_to_ws() {
        assert_eq!(page_endpoint("", "example.org"), "ws://example.org/ws");
        assert_eq!(page_endpoint("file:", "example.org"), "ws://example.org/ws");
    }
}
