use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message sent from the content side to the local authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Is an identity enrolled for this host?
    Check { domain: String },
    /// Request credentials for this host.
    Auth { domain: String },
}

/// Reply from the local authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Check { is_present: bool },
    Auth { username: String, password: String },
    AuthFail,
    /// Non-answer: the service has nothing to say (support disabled,
    /// locked vault, or an unparseable request on its side).
    Empty,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unparseable reply body: {0}")]
    InvalidJson(String),
    #[error("unknown reply shape: {0}")]
    UnknownShape(String),
}

/// Parses a service reply body.
///
/// The service historically wraps its answer in an `{"resp": ...}`
/// envelope and answers `{}` when its own worker times out; its web
/// layer JSON-encodes that answer a second time, so the timeout lands
/// on the wire as the string `"{}"` (and a missing request as `""`).
/// All of these are accepted alongside a bare reply object, and the
/// non-answers map to [`InboundMessage::Empty`].
pub fn parse_reply(body: &str) -> Result<InboundMessage, ProtocolError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(InboundMessage::Empty);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|err| ProtocolError::InvalidJson(err.to_string()))?;

    let reply = match &value {
        Value::String(inner) if inner.trim().is_empty() || inner.trim() == "{}" => {
            return Ok(InboundMessage::Empty)
        }
        Value::Object(map) if map.is_empty() => return Ok(InboundMessage::Empty),
        Value::Object(map) if map.contains_key("resp") => map["resp"].clone(),
        _ => value,
    };

    serde_json::from_value(reply).map_err(|err| ProtocolError::UnknownShape(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_messages_serialize_with_a_type_tag() {
        let json = serde_json::to_string(&OutboundMessage::Check {
            domain: "example.com".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"check","domain":"example.com"}"#);
    }

    #[test]
    fn bare_and_enveloped_replies_both_parse() {
        let bare = parse_reply(r#"{"type":"auth","username":"u","password":"p"}"#).unwrap();
        let wrapped =
            parse_reply(r#"{"resp":{"type":"auth","username":"u","password":"p"}}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(
            bare,
            InboundMessage::Auth {
                username: "u".to_string(),
                password: "p".to_string(),
            }
        );
    }

    #[test]
    fn empty_bodies_are_non_answers() {
        assert_eq!(parse_reply(""), Ok(InboundMessage::Empty));
        assert_eq!(parse_reply("{}"), Ok(InboundMessage::Empty));
        assert_eq!(parse_reply("\"\""), Ok(InboundMessage::Empty));
        // The worker-timeout answer, JSON-encoded once more by the web layer.
        assert_eq!(parse_reply(r#""{}""#), Ok(InboundMessage::Empty));
        assert_eq!(
            parse_reply(r#"{"resp":{"type":"empty"}}"#),
            Ok(InboundMessage::Empty)
        );
    }

    #[test]
    fn other_string_bodies_are_still_rejected() {
        assert!(matches!(
            parse_reply(r#""auth_fail""#),
            Err(ProtocolError::UnknownShape(_))
        ));
    }

    #[test]
    fn garbage_bodies_are_rejected() {
        assert!(matches!(
            parse_reply("<html>"),
            Err(ProtocolError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_reply(r#"{"type":"launch_missiles"}"#),
            Err(ProtocolError::UnknownShape(_))
        ));
    }
}
