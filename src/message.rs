//! Broadcast payload parser
//!
//! The server pushes JSON text frames carrying the latest announcement.
//! Anything that does not look like one is logged and dropped; the display
//! keeps whatever it was showing.

use serde::Deserialize;
use tracing::warn;

/// Payload pushed by the announcement server.
#[derive(Debug, Deserialize)]
pub struct Broadcast {
    pub content: String,
}

/// Parse a text frame and return its `content` field.
///
/// Returns `None` on malformed JSON, a missing `content` field, or a
/// non-string `content`. Extra fields are ignored.
pub fn parse_broadcast(msg: &str) -> Option<String> {
    let broadcast: Broadcast = serde_json::from_str(msg)
        .map_err(|e| {
            warn!(error = %e, "Failed to parse broadcast message");
        })
        .ok()?;
    Some(broadcast.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_field() {
        assert_eq!(
            parse_broadcast(r#"{"content":"hello"}"#),
            Some("hello".to_string())
        );
    }

    #[test]
    fn tolerates_extra_fields() {
        let msg = r#"{"content":"https://www.codingame.com/clashofcode/clash/x","sender":"admin","seq":12}"#;
        assert_eq!(
            parse_broadcast(msg),
            Some("https://www.codingame.com/clashofcode/clash/x".to_string())
        );
    }

    #[test]
    fn rejects_non_json() {
        assert_eq!(parse_broadcast("not json"), None);
    }

    #[test]
    fn rejects_missing_content() {
        assert_eq!(parse_broadcast(r#"{"message":"hello"}"#), None);
    }

    #[test]
    fn rejects_non_string_content() {
        assert_eq!(parse_broadcast(r#"{"content":42}"#), None);
        assert_eq!(parse_broadcast(r#"{"content":null}"#), None);
    }

    #[test]
    fn empty_content_is_still_content() {
        assert_eq!(parse_broadcast(r#"{"content":""}"#), Some(String::new()));
    }
}
